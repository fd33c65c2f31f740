use anyhow::{anyhow, Context, Result};
use log::warn;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::models::CourseRecord;

// Fetches the course list from the endpoint and returns the decoded JSON body.
pub async fn retrieve_courses(client: &Client, endpoint: &Url) -> Result<Value> {
    let response = client
        .get(endpoint.clone())
        .header(ACCEPT, "application/json")
        .send()
        .await
        .context("Failed to send course list request")?;

    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("Course list request failed with status {}", status));
    }

    response
        .json::<Value>()
        .await
        .context("Failed to decode course list response")
}

/// Extracts course records from either a bare array or an object carrying a
/// `courses` array. An object without `courses` yields no records; any other
/// shape is an error.
pub fn parse_course_list(body: &Value) -> Result<Vec<CourseRecord>> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(fields) => match fields.get("courses") {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(other) => {
                return Err(anyhow!(
                    "Expected `courses` to be an array, got {}",
                    kind_of(other)
                ))
            }
        },
        other => return Err(anyhow!("Unexpected course list shape: {}", kind_of(other))),
    };

    let mut courses = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        if !item.is_object() {
            warn!("Skipping course entry {}: expected an object, got {}", idx, kind_of(item));
            continue;
        }
        match serde_json::from_value::<CourseRecord>(item.clone()) {
            Ok(course) => courses.push(course),
            Err(e) => warn!("Skipping course entry {}: {}", idx, e),
        }
    }

    Ok(courses)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
