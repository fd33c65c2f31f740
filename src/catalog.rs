use log::{error, info};
use reqwest::Client;
use url::Url;

use crate::models::{CourseId, CourseRecord};
use crate::utils::courses::{parse_course_list, retrieve_courses};

/// The courses offered this session, in the order the endpoint listed them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<CourseRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<CourseRecord>) -> Self {
        Catalog { courses: records }
    }

    /// Replaces the whole catalog with `records`.
    pub fn load(&mut self, records: Vec<CourseRecord>) {
        self.courses = records;
    }

    /// Fetches the course list from `endpoint` and loads it. Any failure
    /// (transport, status, body, shape) is logged and leaves the catalog empty.
    pub async fn refresh(&mut self, client: &Client, endpoint: &Url) {
        let fetched = retrieve_courses(client, endpoint)
            .await
            .and_then(|body| parse_course_list(&body));

        let records = match fetched {
            Ok(records) => {
                info!("Fetched {} courses from {}", records.len(), endpoint);
                records
            }
            Err(e) => {
                error!("Failed to fetch courses from {}: {:#}", endpoint, e);
                Vec::new()
            }
        };

        self.load(records);
    }

    /// First record carrying `id`, if any.
    pub fn find_by_id(&self, id: CourseId) -> Option<&CourseRecord> {
        self.courses.iter().find(|course| course.id == Some(id))
    }

    /// Credit of `id`, or zero when the catalog has no such course.
    pub fn credit_of(&self, id: CourseId) -> f64 {
        self.find_by_id(id).map_or(0.0, |course| course.credit)
    }

    pub fn records(&self) -> &[CourseRecord] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
