//! Core data model types for quizgrade.
//!
//! These mirror the entities the quiz platform hands to the grader: round
//! templates with their question keys, and the answers a live team submitted
//! for a round. Field names follow the platform's camelCase JSON.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Separator used when a question's slot texts are flattened into one string.
pub const ANSWER_DELIMITER: &str = " | ";

/// Largest number of answer slots any box type exposes.
pub const MAX_SLOTS: usize = 32;

/// Number of sub-slots scanned for "any N of M" list questions.
pub const POOL_SLOTS: usize = 8;

// ---------------------------------------------------------------------------
// Answer box types
// ---------------------------------------------------------------------------

/// The answer-box widget a question is rendered with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerBoxType {
    #[default]
    Input1,
    Input2,
    Input3,
    Input4,
    Input8,
    Input16,
    Input16WithExtra,
    Radio2,
    Radio3,
    Radio4,
    Radio8,
    Input1List,
    Input2List,
    Input3List,
    Input4List,
    Input8List,
    Input16List,
    /// Any tag this version does not know. Graded like `input1`.
    #[serde(other)]
    Unknown,
}

impl AnswerBoxType {
    /// Every known box type, in declaration order.
    pub const ALL: [AnswerBoxType; 17] = [
        AnswerBoxType::Input1,
        AnswerBoxType::Input2,
        AnswerBoxType::Input3,
        AnswerBoxType::Input4,
        AnswerBoxType::Input8,
        AnswerBoxType::Input16,
        AnswerBoxType::Input16WithExtra,
        AnswerBoxType::Radio2,
        AnswerBoxType::Radio3,
        AnswerBoxType::Radio4,
        AnswerBoxType::Radio8,
        AnswerBoxType::Input1List,
        AnswerBoxType::Input2List,
        AnswerBoxType::Input3List,
        AnswerBoxType::Input4List,
        AnswerBoxType::Input8List,
        AnswerBoxType::Input16List,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerBoxType::Input1 => "input1",
            AnswerBoxType::Input2 => "input2",
            AnswerBoxType::Input3 => "input3",
            AnswerBoxType::Input4 => "input4",
            AnswerBoxType::Input8 => "input8",
            AnswerBoxType::Input16 => "input16",
            AnswerBoxType::Input16WithExtra => "input16_with_extra",
            AnswerBoxType::Radio2 => "radio2",
            AnswerBoxType::Radio3 => "radio3",
            AnswerBoxType::Radio4 => "radio4",
            AnswerBoxType::Radio8 => "radio8",
            AnswerBoxType::Input1List => "input1_list",
            AnswerBoxType::Input2List => "input2_list",
            AnswerBoxType::Input3List => "input3_list",
            AnswerBoxType::Input4List => "input4_list",
            AnswerBoxType::Input8List => "input8_list",
            AnswerBoxType::Input16List => "input16_list",
            AnswerBoxType::Unknown => "unknown",
        }
    }

    /// Number of input boxes a team sees for this question.
    pub fn num_answers(&self) -> usize {
        match self {
            AnswerBoxType::Radio2
            | AnswerBoxType::Radio3
            | AnswerBoxType::Radio4
            | AnswerBoxType::Radio8
            | AnswerBoxType::Input1
            | AnswerBoxType::Input1List
            | AnswerBoxType::Unknown => 1,
            AnswerBoxType::Input2 | AnswerBoxType::Input2List => 2,
            AnswerBoxType::Input3 | AnswerBoxType::Input3List => 3,
            AnswerBoxType::Input4 | AnswerBoxType::Input4List => 4,
            AnswerBoxType::Input8 | AnswerBoxType::Input8List => 8,
            AnswerBoxType::Input16 | AnswerBoxType::Input16List => 16,
            AnswerBoxType::Input16WithExtra => MAX_SLOTS,
        }
    }

    /// Number of key slots the question author may fill in.
    ///
    /// List variants accept any subset of a larger pool, so they report the
    /// full slot capacity instead of the box count.
    pub fn num_correct_answers(&self) -> usize {
        if self.is_list() {
            MAX_SLOTS
        } else {
            self.num_answers()
        }
    }

    /// Number of radio options rendered, zero for text inputs.
    pub fn num_radio_boxes(&self) -> usize {
        match self {
            AnswerBoxType::Radio2 => 2,
            AnswerBoxType::Radio3 => 3,
            AnswerBoxType::Radio4 => 4,
            AnswerBoxType::Radio8 => 8,
            _ => 0,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(
            self,
            AnswerBoxType::Input1List
                | AnswerBoxType::Input2List
                | AnswerBoxType::Input3List
                | AnswerBoxType::Input4List
                | AnswerBoxType::Input8List
                | AnswerBoxType::Input16List
        )
    }

    /// How the question's slots are interpreted for grading.
    pub fn layout(&self) -> SlotLayout {
        if self.num_correct_answers() != self.num_answers() {
            SlotLayout::Pool { slots: POOL_SLOTS }
        } else {
            SlotLayout::Fixed {
                slots: self.num_answers(),
            }
        }
    }
}

impl fmt::Display for AnswerBoxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerBoxType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        AnswerBoxType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| format!("unknown answer box type: {s}"))
    }
}

// ---------------------------------------------------------------------------
// Slot layouts
// ---------------------------------------------------------------------------

/// Live-slot interpretation derived from an [`AnswerBoxType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SlotLayout {
    /// One key slot per input box, compared as given.
    Fixed { slots: usize },
    /// A pool of acceptable answers; only key-bearing slots take part and
    /// order is never meaningful.
    Pool { slots: usize },
}

impl SlotLayout {
    /// Slots that make up the question's comparison arrays.
    ///
    /// `Fixed` layouts always yield every slot so the arrays keep the box
    /// shape; `Pool` layouts only yield slots whose key has content.
    pub fn slots(&self, key: &AnswerState) -> Vec<SlotKey> {
        match *self {
            SlotLayout::Fixed { slots } => (1..=slots).map(SlotKey).collect(),
            SlotLayout::Pool { slots } => (1..=slots)
                .map(SlotKey)
                .filter(|slot| key.has_content(*slot))
                .collect(),
        }
    }

    /// Slots that receive a verdict: the key-bearing subset of [`Self::slots`].
    pub fn live_slots(&self, key: &AnswerState) -> Vec<SlotKey> {
        self.slots(key)
            .into_iter()
            .filter(|slot| key.has_content(*slot))
            .collect()
    }

    /// Order flag actually applied when matching.
    pub fn effective_order(&self, order_matters: bool) -> bool {
        match self {
            SlotLayout::Fixed { .. } => order_matters,
            SlotLayout::Pool { .. } => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Slot keys and answer states
// ---------------------------------------------------------------------------

/// A numbered answer slot, rendered as `answer<N>` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey(pub usize);

impl SlotKey {
    pub fn number(&self) -> usize {
        self.0
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "answer{}", self.0)
    }
}

impl FromStr for SlotKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("answer")
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|n| *n >= 1)
            .map(SlotKey)
            .ok_or_else(|| format!("not an answer slot key: {s}"))
    }
}

impl Serialize for SlotKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Text values keyed by slot name (`answer1`, `radio2`, ...).
///
/// Reads of absent keys yield the empty string. When deserializing, `null`
/// and non-string values are kept as empty strings rather than rejected, and
/// a JSON-encoded string is decoded with [`AnswerState::parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerState(BTreeMap<String, String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientText {
    Text(String),
    Other(IgnoredAny),
}

impl LenientText {
    fn into_string(self) -> String {
        match self {
            LenientText::Text(s) => s,
            LenientText::Other(_) => String::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAnswerState {
    Map(BTreeMap<String, LenientText>),
    Encoded(String),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for AnswerState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawAnswerState::deserialize(deserializer)? {
            RawAnswerState::Map(map) => AnswerState(
                map.into_iter()
                    .map(|(k, v)| (k, v.into_string()))
                    .collect(),
            ),
            RawAnswerState::Encoded(raw) => AnswerState::parse(Some(&raw)),
            RawAnswerState::Other(_) => AnswerState::default(),
        })
    }
}

/// Field deserializer that reads `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientBoxType {
    Known(AnswerBoxType),
    Other(IgnoredAny),
}

/// `null` reads as the default box type; any other non-string tag as `Unknown`.
fn lenient_box_type<'de, D>(deserializer: D) -> Result<AnswerBoxType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LenientBoxType>::deserialize(deserializer)? {
        None => AnswerBoxType::default(),
        Some(LenientBoxType::Known(t)) => t,
        Some(LenientBoxType::Other(_)) => AnswerBoxType::Unknown,
    })
}

impl AnswerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON-encoded answer state as stored by the platform.
    ///
    /// Absent input is an empty state; malformed JSON degrades to a state
    /// holding a single empty `answer1`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Self::default(),
            Some(s) if s.trim().is_empty() => Self::default(),
            Some(s) => serde_json::from_str(s).unwrap_or_else(|e| {
                tracing::debug!("unreadable answer state, using blank answer1: {e}");
                [(SlotKey(1).to_string(), String::new())]
                    .into_iter()
                    .collect()
            }),
        }
    }

    /// Value stored under `key`, or `""`.
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn answer(&self, slot: SlotKey) -> &str {
        self.get(&slot.to_string())
    }

    /// Whether the slot holds anything besides whitespace.
    pub fn has_content(&self, slot: SlotKey) -> bool {
        !self.answer(slot).trim().is_empty()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn set_answer(&mut self, slot: SlotKey, value: impl Into<String>) {
        self.set(slot.to_string(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build a state from positional answers, `answer1` first.
    pub fn from_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        answers
            .into_iter()
            .enumerate()
            .map(|(i, a)| (SlotKey(i + 1).to_string(), a.into()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AnswerState {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        AnswerState(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// Verdicts
// ---------------------------------------------------------------------------

/// Classification of one answer slot.
///
/// Ordered from worst to best so verdicts can be compared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Incorrect,
    /// Needs a human to adjudicate.
    Uncertain,
    Correct,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Incorrect => write!(f, "incorrect"),
            Verdict::Uncertain => write!(f, "uncertain"),
            Verdict::Correct => write!(f, "correct"),
        }
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "correct" | "true" => Ok(Verdict::Correct),
            "incorrect" | "false" => Ok(Verdict::Incorrect),
            "uncertain" | "unknown" => Ok(Verdict::Uncertain),
            other => Err(format!("unknown verdict: {other}")),
        }
    }
}

/// Verdicts for one question, keyed by the key slot they grade.
pub type GradedAnswerState = BTreeMap<SlotKey, Verdict>;

/// Per-verdict tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictCounts {
    pub correct: usize,
    pub incorrect: usize,
    pub uncertain: usize,
}

impl VerdictCounts {
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Correct => self.correct += 1,
            Verdict::Incorrect => self.incorrect += 1,
            Verdict::Uncertain => self.uncertain += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.correct + self.incorrect + self.uncertain
    }
}

/// Graded answers for one team in one round, keyed by 1-based question
/// position within the round's question order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundGradeResult(BTreeMap<usize, GradedAnswerState>);

impl RoundGradeResult {
    pub(crate) fn from_questions(questions: BTreeMap<usize, GradedAnswerState>) -> Self {
        RoundGradeResult(questions)
    }

    /// Verdicts for the question at `position` (1-based).
    pub fn question(&self, position: usize) -> Option<&GradedAnswerState> {
        self.0.get(&position)
    }

    pub fn verdict(&self, position: usize, slot: SlotKey) -> Option<Verdict> {
        self.question(position).and_then(|q| q.get(&slot)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &GradedAnswerState)> {
        self.0.iter().map(|(p, q)| (*p, q))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn counts(&self) -> VerdictCounts {
        let mut counts = VerdictCounts::default();
        for verdict in self.0.values().flat_map(|q| q.values()) {
            counts.record(*verdict);
        }
        counts
    }
}

// ---------------------------------------------------------------------------
// Templates and submissions
// ---------------------------------------------------------------------------

/// A question as authored in a round template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionTemplate {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// The answer key.
    #[serde(default)]
    pub answers: AnswerState,
    #[serde(default, deserialize_with = "lenient_box_type")]
    pub answer_type: AnswerBoxType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_matters: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_bonus: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A round of questions with its display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundTemplate {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Question ids in the order they are asked.
    #[serde(default, deserialize_with = "null_as_default")]
    pub question_order: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<QuestionTemplate>,
}

impl RoundTemplate {
    pub fn question(&self, id: &str) -> Option<&QuestionTemplate> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// Everything a team submitted for one round.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundAnswers {
    pub round_id: String,
    /// Submitted answers keyed by question position (`"1"`, `"2"`, ...).
    #[serde(default, deserialize_with = "null_as_default")]
    pub answers: BTreeMap<String, AnswerState>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub did_joker: bool,
}

impl RoundAnswers {
    pub fn for_position(&self, position: usize) -> Option<&AnswerState> {
        self.answers.get(&position.to_string())
    }
}

/// A team taking part in a live quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveQuizTeam {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub live_quiz_round_answers: Vec<RoundAnswers>,
}

impl LiveQuizTeam {
    pub fn round_answers(&self, round_id: &str) -> Option<&RoundAnswers> {
        self.live_quiz_round_answers
            .iter()
            .find(|a| a.round_id == round_id)
    }
}

/// A quiz with its rounds and participating teams, as exported by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rounds: Vec<RoundTemplate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teams: Vec<LiveQuizTeam>,
}

impl Quiz {
    pub fn round(&self, id: &str) -> Option<&RoundTemplate> {
        self.rounds.iter().find(|r| r.id == id)
    }

    pub fn team(&self, id: &str) -> Option<&LiveQuizTeam> {
        self.teams.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_type_display_and_parse() {
        assert_eq!(AnswerBoxType::Input16WithExtra.to_string(), "input16_with_extra");
        assert_eq!(
            "input3_list".parse::<AnswerBoxType>().unwrap(),
            AnswerBoxType::Input3List
        );
        assert_eq!("RADIO4".parse::<AnswerBoxType>().unwrap(), AnswerBoxType::Radio4);
        assert!("input5".parse::<AnswerBoxType>().is_err());
        for t in AnswerBoxType::ALL {
            assert_eq!(t.as_str().parse::<AnswerBoxType>().unwrap(), t);
        }
    }

    #[test]
    fn box_type_serde_names() {
        let t: AnswerBoxType = serde_json::from_str("\"input8_list\"").unwrap();
        assert_eq!(t, AnswerBoxType::Input8List);
        let unknown: AnswerBoxType = serde_json::from_str("\"slider\"").unwrap();
        assert_eq!(unknown, AnswerBoxType::Unknown);
        assert_eq!(
            serde_json::to_string(&AnswerBoxType::Input16WithExtra).unwrap(),
            "\"input16_with_extra\""
        );
    }

    #[test]
    fn cardinalities() {
        assert_eq!(AnswerBoxType::Radio8.num_answers(), 1);
        assert_eq!(AnswerBoxType::Radio8.num_radio_boxes(), 8);
        assert_eq!(AnswerBoxType::Input3.num_answers(), 3);
        assert_eq!(AnswerBoxType::Input3.num_correct_answers(), 3);
        assert_eq!(AnswerBoxType::Input3List.num_answers(), 3);
        assert_eq!(AnswerBoxType::Input3List.num_correct_answers(), 32);
        assert_eq!(AnswerBoxType::Input16WithExtra.num_answers(), 32);
        assert_eq!(AnswerBoxType::Input16WithExtra.num_correct_answers(), 32);
        assert_eq!(AnswerBoxType::Unknown.num_answers(), 1);
        assert_eq!(AnswerBoxType::Input4.num_radio_boxes(), 0);
    }

    #[test]
    fn layouts() {
        assert_eq!(AnswerBoxType::Input4.layout(), SlotLayout::Fixed { slots: 4 });
        assert_eq!(
            AnswerBoxType::Input16WithExtra.layout(),
            SlotLayout::Fixed { slots: 32 }
        );
        assert_eq!(AnswerBoxType::Input2List.layout(), SlotLayout::Pool { slots: 8 });
        assert!(!SlotLayout::Pool { slots: 8 }.effective_order(true));
        assert!(SlotLayout::Fixed { slots: 2 }.effective_order(true));
    }

    #[test]
    fn fixed_layout_keeps_empty_slots_but_live_slots_skip_them() {
        let key = AnswerState::from_answers(["Paris", "", "Rome"]);
        let layout = SlotLayout::Fixed { slots: 3 };
        assert_eq!(layout.slots(&key), vec![SlotKey(1), SlotKey(2), SlotKey(3)]);
        assert_eq!(layout.live_slots(&key), vec![SlotKey(1), SlotKey(3)]);
    }

    #[test]
    fn pool_layout_only_scans_eight_key_bearing_slots() {
        let mut key = AnswerState::new();
        key.set_answer(SlotKey(2), "Mercury");
        key.set_answer(SlotKey(5), "Venus");
        key.set_answer(SlotKey(9), "Pluto");
        let layout = SlotLayout::Pool { slots: POOL_SLOTS };
        assert_eq!(layout.slots(&key), vec![SlotKey(2), SlotKey(5)]);
        assert_eq!(layout.live_slots(&key), vec![SlotKey(2), SlotKey(5)]);
    }

    #[test]
    fn slot_key_wire_format() {
        assert_eq!(SlotKey(12).to_string(), "answer12");
        assert_eq!("answer3".parse::<SlotKey>().unwrap(), SlotKey(3));
        assert!("answer0".parse::<SlotKey>().is_err());
        assert!("radio1".parse::<SlotKey>().is_err());
        assert!(SlotKey(2) < SlotKey(10));
    }

    #[test]
    fn answer_state_tolerates_non_string_values() {
        let state: AnswerState =
            serde_json::from_str(r#"{"answer1": "Paris", "answer2": null, "answer3": 7}"#)
                .unwrap();
        assert_eq!(state.answer(SlotKey(1)), "Paris");
        assert_eq!(state.answer(SlotKey(2)), "");
        assert_eq!(state.answer(SlotKey(3)), "");
        assert_eq!(state.answer(SlotKey(4)), "");

        let null_state: AnswerState = serde_json::from_str("null").unwrap();
        assert!(null_state.is_empty());

        let list_state: AnswerState = serde_json::from_str(r#"["Paris"]"#).unwrap();
        assert!(list_state.is_empty());
    }

    #[test]
    fn answer_state_decodes_json_encoded_strings() {
        let encoded: AnswerState =
            serde_json::from_str(r#""{\"answer1\":\"Paris\",\"answer2\":null}""#).unwrap();
        assert_eq!(encoded.answer(SlotKey(1)), "Paris");
        assert_eq!(encoded.answer(SlotKey(2)), "");

        let garbage: AnswerState = serde_json::from_str(r#""not json at all""#).unwrap();
        assert_eq!(garbage.len(), 1);
        assert_eq!(garbage.answer(SlotKey(1)), "");

        let blank: AnswerState = serde_json::from_str(r#""""#).unwrap();
        assert!(blank.is_empty());
    }

    #[test]
    fn answer_state_parse_fallbacks() {
        assert!(AnswerState::parse(None).is_empty());
        let parsed = AnswerState::parse(Some(r#"{"answer1":"Oslo"}"#));
        assert_eq!(parsed.answer(SlotKey(1)), "Oslo");

        let broken = AnswerState::parse(Some("{not json"));
        assert_eq!(broken.len(), 1);
        assert_eq!(broken.get("answer1"), "");
    }

    #[test]
    fn verdict_parse_accepts_legacy_names() {
        assert_eq!("true".parse::<Verdict>().unwrap(), Verdict::Correct);
        assert_eq!("unknown".parse::<Verdict>().unwrap(), Verdict::Uncertain);
        assert_eq!("Incorrect".parse::<Verdict>().unwrap(), Verdict::Incorrect);
        assert!(Verdict::Incorrect < Verdict::Uncertain);
        assert!(Verdict::Uncertain < Verdict::Correct);
    }

    #[test]
    fn round_grade_result_serializes_with_slot_names() {
        let mut q1 = GradedAnswerState::new();
        q1.insert(SlotKey(1), Verdict::Correct);
        q1.insert(SlotKey(2), Verdict::Uncertain);
        let mut questions = BTreeMap::new();
        questions.insert(1, q1);
        let result = RoundGradeResult::from_questions(questions);

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"1":{"answer1":"correct","answer2":"uncertain"}}"#);

        let back: RoundGradeResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
        assert_eq!(result.counts().total(), 2);
        assert_eq!(result.verdict(1, SlotKey(2)), Some(Verdict::Uncertain));
    }

    #[test]
    fn quiz_deserializes_platform_json() {
        let json = r#"{
            "id": "quiz-1",
            "name": "Pub Night",
            "rounds": [{
                "id": "r1",
                "title": "Capitals",
                "questionOrder": ["q1"],
                "questions": [{
                    "id": "q1",
                    "text": "Capital of France?",
                    "answers": {"answer1": "Paris"},
                    "answerType": "input1",
                    "orderMatters": false,
                    "isBonus": false
                }]
            }],
            "teams": [{
                "id": "t1",
                "teamName": "Quizzly Bears",
                "liveQuizRoundAnswers": [{
                    "roundId": "r1",
                    "answers": {"1": {"answer1": "paris"}}
                }]
            }]
        }"#;
        let quiz: Quiz = serde_json::from_str(json).unwrap();
        let round = quiz.round("r1").unwrap();
        assert_eq!(round.question("q1").unwrap().answer_type, AnswerBoxType::Input1);
        let team = quiz.team("t1").unwrap();
        let answers = team.round_answers("r1").unwrap();
        assert_eq!(answers.for_position(1).unwrap().answer(SlotKey(1)), "paris");
        assert!(answers.for_position(2).is_none());
    }
}
