use serde::{Deserialize, Deserializer, Serialize};

/// A single todo item as stored in `tasks.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique within the live collection; never reused while the task exists.
    /// Hand-edited files may carry a number here.
    #[serde(deserialize_with = "deserialize_text")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub completed: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub priority: bool,
    /// Creation stamp (`DDMMYYYYHHMM`). Older files may carry a number here.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub created_at: String,
}

impl Task {
    /// The checkbox glyph shown in the list
    pub fn status_mark(&self) -> char {
        if self.completed { '\u{2713}' } else { '\u{25A2}' }
    }

    /// `!` for priority tasks, empty otherwise
    pub fn priority_mark(&self) -> &'static str {
        if self.priority { "!" } else { "" }
    }
}

/// On-disk shape of the tasks document: `{ "tasks": [...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskDocument {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TaskDocument {
    /// Parse a tasks document, keeping every record that reads as a task.
    ///
    /// Fails only when `text` is not JSON or `tasks` is not an array. The second
    /// value counts records that were present but could not be read as tasks.
    pub fn parse_lenient(text: &str) -> Result<(TaskDocument, usize), serde_json::Error> {
        #[derive(Deserialize)]
        struct RawDocument {
            #[serde(default)]
            tasks: Vec<serde_json::Value>,
        }

        let raw: RawDocument = serde_json::from_str(text)?;
        let total = raw.tasks.len();
        let tasks: Vec<Task> = raw
            .tasks
            .into_iter()
            .filter_map(|record| serde_json::from_value(record).ok())
            .collect();
        let skipped = total - tasks.len();
        Ok((TaskDocument { tasks }, skipped))
    }
}

/// Accept a string or a number, keeping it as text. Null reads as empty.
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

/// Read a flag the way a loosely typed writer meant it: null, `0`, `""` and
/// `false` are false, everything else is true.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::Null => false,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    })
}
