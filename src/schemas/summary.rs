use serde::ser::{Serialize, SerializeMap, Serializer};

/// Renderable value of a summary row.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SummaryContent {
    Text { text: String },
    /// Markup produced by the host, passed through untouched.
    Html { html: String },
    Link { url: String, text: String },
    UserPicture { user_id: i64, course_id: i64, full_name: String, size: u32 },
}

impl SummaryContent {
    pub fn text(text: impl Into<String>) -> Self {
        SummaryContent::Text { text: text.into() }
    }

    pub fn html(html: impl Into<String>) -> Self {
        SummaryContent::Html { html: html.into() }
    }

    /// The visible text, without markup or link targets.
    pub fn plain_text(&self) -> &str {
        match self {
            SummaryContent::Text { text } | SummaryContent::Link { text, .. } => text,
            SummaryContent::Html { html } => html,
            SummaryContent::UserPicture { full_name, .. } => full_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SummaryItem {
    pub title: SummaryContent,
    pub content: SummaryContent,
}

impl SummaryItem {
    pub fn text(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { title: SummaryContent::text(title), content: SummaryContent::text(content) }
    }
}

/// Ordered key to row mapping. Re-inserting a key replaces its row in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryData {
    rows: Vec<(String, SummaryItem)>,
}

impl SummaryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, item: SummaryItem) {
        let key = key.into();
        match self.rows.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, row)) => *row = item,
            None => self.rows.push((key, item)),
        }
    }

    /// Merges `other` into `self`; keys already present take the new row.
    pub fn extend(&mut self, other: SummaryData) {
        for (key, item) in other.rows {
            self.insert(key, item);
        }
    }

    pub fn get(&self, key: &str) -> Option<&SummaryItem> {
        self.rows.iter().find(|(existing, _)| existing == key).map(|(_, item)| item)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SummaryItem)> {
        self.rows.iter().map(|(key, item)| (key.as_str(), item))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<(String, SummaryItem)> for SummaryData {
    fn from_iter<I: IntoIterator<Item = (String, SummaryItem)>>(iter: I) -> Self {
        let mut data = SummaryData::new();
        for (key, item) in iter {
            data.insert(key, item);
        }
        data
    }
}

impl Serialize for SummaryData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (key, item) in &self.rows {
            map.serialize_entry(key, item)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_replaces_in_place() {
        let mut data = SummaryData::new();
        data.insert("startedon", SummaryItem::text("Started on", "today"));
        data.insert("state", SummaryItem::text("State", "Finished"));
        data.insert("startedon", SummaryItem::text("Started on", "yesterday"));

        assert_eq!(data.keys().collect::<Vec<_>>(), vec!["startedon", "state"]);
        assert_eq!(data.get("startedon").unwrap().content.plain_text(), "yesterday");
    }

    #[test]
    fn extend_appends_new_keys() {
        let mut data: SummaryData =
            [("state".to_string(), SummaryItem::text("State", "Finished"))].into_iter().collect();
        let extra: SummaryData = [
            ("state".to_string(), SummaryItem::text("State", "Graded")),
            ("certainty".to_string(), SummaryItem::text("Certainty", "High")),
        ]
        .into_iter()
        .collect();
        data.extend(extra);

        assert_eq!(data.keys().collect::<Vec<_>>(), vec!["state", "certainty"]);
        assert_eq!(data.get("state").unwrap().content.plain_text(), "Graded");
    }

    #[test]
    fn serializes_as_tagged_rows() {
        let mut data = SummaryData::new();
        data.insert("state", SummaryItem::text("State", "Finished"));
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(
            value,
            json!({
                "state": {
                    "title": {"type": "text", "text": "State"},
                    "content": {"type": "text", "text": "Finished"}
                }
            })
        );
    }
}
