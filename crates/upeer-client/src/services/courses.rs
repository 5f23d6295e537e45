use upeer_types::api::{ApiMessage, EnrollRequest};
use upeer_types::models::Course;

use crate::error::ClientError;
use crate::gateway::ApiClient;

#[derive(Clone)]
pub struct CourseService {
    api: ApiClient,
}

impl CourseService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All courses on offer.
    pub async fn list(&self) -> Result<Vec<Course>, ClientError> {
        self.api.get("courses/").await
    }

    /// The current user's enrolled courses.
    pub async fn mine(&self) -> Result<Vec<Course>, ClientError> {
        self.api.get("courses/mine/").await
    }

    pub async fn enroll(&self, course_id: i64) -> Result<(), ClientError> {
        let _: ApiMessage = self
            .api
            .post("courses/enrol/", &EnrollRequest { course_id })
            .await?;
        Ok(())
    }

    pub async fn unenroll(&self, course_id: i64) -> Result<(), ClientError> {
        self.api.delete(&format!("courses/enrol/{course_id}/")).await
    }
}
