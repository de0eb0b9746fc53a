use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Opaque player identifier, normalized to its string form.
///
/// Replays store ids either as JSON strings or as bare numbers; both map to
/// the same textual id so `"9007"` and `9007` are one player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => PlayerId(s),
            other => PlayerId(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last `n` characters, for compact console labels.
    pub fn short(&self, n: usize) -> &str {
        let skip = self.0.chars().count().saturating_sub(n);
        match self.0.char_indices().nth(skip) {
            Some((idx, _)) => &self.0[idx..],
            None => &self.0,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(PlayerId::from_value)
    }
}

/// Any JSON number; other values read as absent.
fn number_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64())
}

/// Treat an explicit `null` the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Event type, carrying only the payload fields the analyzers read.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Goal {
        /// Scoring team from `data.team` (1 = red, 2 = blue, 0 = unknown)
        team: u32,
    },
    TackleSuccess,
    PossessionGain,
    Respawn,
    /// Recognized only for the raw tally
    Other(String),
    /// Event had no `type`
    Untyped,
}

impl EventKind {
    fn from_raw(kind: &Value, data: &Value) -> Self {
        let name = match kind {
            Value::Null => return EventKind::Untyped,
            Value::String(name) => name.as_str(),
            other => return EventKind::Other(other.to_string()),
        };
        match name {
            "goal" => EventKind::Goal { team: team_number(&data["team"]) },
            "tackle_success" => EventKind::TackleSuccess,
            "possession_gain" => EventKind::PossessionGain,
            "respawn" => EventKind::Respawn,
            other => EventKind::Other(other.to_string()),
        }
    }

    /// Name used in the raw event-type tally.
    pub fn label(&self) -> &str {
        match self {
            EventKind::Goal { .. } => "goal",
            EventKind::TackleSuccess => "tackle_success",
            EventKind::PossessionGain => "possession_gain",
            EventKind::Respawn => "respawn",
            EventKind::Other(name) => name,
            EventKind::Untyped => "untyped",
        }
    }

    /// Tackles, pickups and goals drive every derived timeline.
    pub fn is_interaction(&self) -> bool {
        matches!(
            self,
            EventKind::Goal { .. } | EventKind::TackleSuccess | EventKind::PossessionGain
        )
    }

    pub fn is_goal(&self) -> bool {
        matches!(self, EventKind::Goal { .. })
    }
}

/// `data.team` as written by the server; integral floats such as `1.0` are
/// the same team, anything else is 0 (unknown).
fn team_number(team: &Value) -> u32 {
    if let Some(t) = team.as_u64() {
        return u32::try_from(t).unwrap_or(0);
    }
    team.as_f64()
        .filter(|t| t.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(t))
        .map_or(0, |t| t as u32)
}

/// Event fields kept as raw JSON so one odd value never fails the file.
#[derive(Deserialize)]
struct RawEvent {
    #[serde(rename = "type", default)]
    kind: Value,
    #[serde(default)]
    time: Value,
    #[serde(default)]
    pids: Value,
    #[serde(default)]
    data: Value,
}

/// One timestamped replay event.
///
/// `pids` is ordered: the first id is taken to be the acting player (scorer,
/// knocker) and later ids the affected players. That ordering is inferred
/// from how the game records events, not guaranteed by the file format.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawEvent")]
pub struct MatchEvent {
    /// Seconds; missing or non-numeric times read as 0
    pub time: f64,
    pub pids: Vec<PlayerId>,
    pub kind: EventKind,
}

impl From<RawEvent> for MatchEvent {
    fn from(raw: RawEvent) -> Self {
        let kind = EventKind::from_raw(&raw.kind, &raw.data);
        let pids = match raw.pids {
            Value::Array(ids) => ids.into_iter().map(PlayerId::from_value).collect(),
            _ => Vec::new(),
        };
        Self { time: raw.time.as_f64().unwrap_or(0.0), pids, kind }
    }
}

impl MatchEvent {
    pub fn new(kind: EventKind, time: f64, pids: &[&str]) -> Self {
        Self { time, pids: pids.iter().map(|&p| PlayerId::from(p)).collect(), kind }
    }

    /// Acting player, under the first-pid convention.
    pub fn actor(&self) -> Option<&PlayerId> {
        self.pids.first()
    }
}

/// Roster entry; only entries carrying both fields are usable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerInfo {
    #[serde(default)]
    pub id: Option<PlayerId>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One replay file as written by the game.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ReplayDoc {
    /// Match length reported by the server, seconds
    #[serde(default, deserialize_with = "number_or_none")]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: Vec<PlayerInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<MatchEvent>,
}

impl ReplayDoc {
    /// `(id, name)` pairs of fully specified roster entries.
    pub fn named_players(&self) -> impl Iterator<Item = (&PlayerId, &str)> {
        self.players
            .iter()
            .filter_map(|p| Some((p.id.as_ref()?, p.name.as_deref()?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_ids_match() {
        let ids: Vec<PlayerId> =
            serde_json::from_str(r#"["90071996842377216", 90071996842377216, -3]"#).unwrap();
        assert_eq!(ids[0], ids[1]);
        assert_eq!(ids[2].as_str(), "-3");
    }

    #[test]
    fn test_event_defaults() {
        let event: MatchEvent = serde_json::from_str(r#"{"type": "tackle_success"}"#).unwrap();
        assert_eq!(event.time, 0.0);
        assert!(event.pids.is_empty());
        assert_eq!(event.kind, EventKind::TackleSuccess);

        let untyped: MatchEvent = serde_json::from_str(r#"{"time": 4.5, "pids": null}"#).unwrap();
        assert_eq!(untyped.kind, EventKind::Untyped);
        assert_eq!(untyped.kind.label(), "untyped");
        assert_eq!(untyped.time, 4.5);
    }

    #[test]
    fn test_goal_keeps_team() {
        let event: MatchEvent = serde_json::from_str(
            r#"{"type": "goal", "time": 12, "pids": ["a"], "data": {"team": 2, "speed": 900}}"#,
        )
        .unwrap();
        assert_eq!(event.kind, EventKind::Goal { team: 2 });

        let no_team: MatchEvent = serde_json::from_str(r#"{"type": "goal"}"#).unwrap();
        assert_eq!(no_team.kind, EventKind::Goal { team: 0 });
    }

    #[test]
    fn test_goal_team_accepts_integral_floats() {
        let team = |data: &str| {
            let json = format!(r#"{{"type": "goal", "time": 1, "data": {}}}"#, data);
            serde_json::from_str::<MatchEvent>(&json).unwrap().kind
        };
        assert_eq!(team(r#"{"team": 1.0}"#), EventKind::Goal { team: 1 });
        assert_eq!(team(r#"{"team": 2e0}"#), EventKind::Goal { team: 2 });
        assert_eq!(team(r#"{"team": 1.5}"#), EventKind::Goal { team: 0 });
        assert_eq!(team(r#"{"team": -1}"#), EventKind::Goal { team: 0 });
        assert_eq!(team(r#"{"team": "1"}"#), EventKind::Goal { team: 0 });
        assert_eq!(team("null"), EventKind::Goal { team: 0 });
    }

    #[test]
    fn test_odd_field_types_do_not_fail_the_replay() {
        let doc: ReplayDoc = serde_json::from_str(
            r#"{"events": [
                {"type": "goal", "time": 1, "pids": ["a"], "data": {"team": 1}},
                {"type": 7, "time": 2},
                {"type": "tackle_success", "time": "late", "pids": "b"},
                {"type": ["x"], "time": null, "pids": [true, 5]}
            ]}"#,
        )
        .unwrap();

        assert_eq!(doc.events.len(), 4);
        assert_eq!(doc.events[0].kind, EventKind::Goal { team: 1 });
        assert_eq!(doc.events[1].kind, EventKind::Other("7".to_string()));
        assert_eq!(doc.events[1].kind.label(), "7");
        assert!(!doc.events[1].kind.is_interaction());
        assert_eq!(doc.events[2].kind, EventKind::TackleSuccess);
        assert_eq!(doc.events[2].time, 0.0);
        assert!(doc.events[2].pids.is_empty());
        assert_eq!(doc.events[3].kind.label(), r#"["x"]"#);
        assert_eq!(doc.events[3].pids, vec![PlayerId::from("true"), PlayerId::from("5")]);
    }

    #[test]
    fn test_unknown_type_is_tallied_not_interaction() {
        let event: MatchEvent =
            serde_json::from_str(r#"{"type": "ball_reset", "time": 3}"#).unwrap();
        assert_eq!(event.kind.label(), "ball_reset");
        assert!(!event.kind.is_interaction());
        assert!(!EventKind::Respawn.is_interaction());
        assert!(EventKind::PossessionGain.is_interaction());
    }

    #[test]
    fn test_actor_is_first_pid_by_convention() {
        let event = MatchEvent::new(EventKind::TackleSuccess, 1.0, &["knocker", "victim"]);
        assert_eq!(event.actor().map(PlayerId::as_str), Some("knocker"));
    }

    #[test]
    fn test_doc_named_players_skips_partial_entries() {
        let doc: ReplayDoc = serde_json::from_str(
            r#"{"players": [{"id": 1, "name": "Ann"}, {"id": 2}, {"name": "ghost"}]}"#,
        )
        .unwrap();
        let named: Vec<_> = doc.named_players().collect();
        assert_eq!(named, vec![(&PlayerId::from("1"), "Ann")]);
        assert!(doc.events.is_empty());
        assert_eq!(doc.duration, None);

        let odd: ReplayDoc = serde_json::from_str(r#"{"duration": "10 min"}"#).unwrap();
        assert_eq!(odd.duration, None);
    }

    #[test]
    fn test_short_label() {
        assert_eq!(PlayerId::from("90071996842377216").short(6), "377216");
        assert_eq!(PlayerId::from("abc").short(6), "abc");
    }
}
