// src/models/job.rs
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Which adapter a ranked job came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobSourceTag {
    #[serde(rename = "API")]
    Api,
    #[serde(rename = "NCO")]
    Nco,
}

impl JobSourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobSourceTag::Api => "API",
            JobSourceTag::Nco => "NCO",
        }
    }
}

impl fmt::Display for JobSourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A job opening as shown on the results page.
///
/// Text fields default to `""` (JSON `null` included), `match_score` to `0.0`
/// until the ranker sets it. Unknown fields from the job API are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub job_title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub employer_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub job_city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub job_publisher: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub job_apply_link: String,
    #[serde(default)]
    pub match_score: f64,
    #[serde(default)]
    pub source: Option<JobSourceTag>,
}

impl JobRecord {
    #[cfg(test)]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            job_title: title.into(),
            ..Default::default()
        }
    }

    pub fn source_label(&self) -> &'static str {
        self.source.map(|s| s.as_str()).unwrap_or("")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// What the student asked for, as passed to every job source.
#[derive(Debug, Clone, Default)]
pub struct JobQuery {
    pub description: String,
    pub industry: String,
    pub experience: String,
}

// Fields of the search form on the index page
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub career_goal: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub experience: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_missing_fields_become_empty_strings() {
        let job: JobRecord = serde_json::from_value(json!({
            "job_title": "Data Analyst",
            "job_city": null,
            "job_id": "abc123",
            "job_is_remote": false
        }))
        .unwrap();

        assert_eq!(job.job_title, "Data Analyst");
        assert_eq!(job.job_city, "");
        assert_eq!(job.employer_name, "");
        assert_eq!(job.match_score, 0.0);
        assert!(job.source.is_none());
    }

    #[test]
    fn source_tag_serializes_as_upper_case_label() {
        assert_eq!(serde_json::to_string(&JobSourceTag::Api).unwrap(), "\"API\"");
        assert_eq!(JobSourceTag::Nco.to_string(), "NCO");
    }
}
