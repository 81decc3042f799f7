use async_trait::async_trait;
use dashboard_core::{
    models::session::Session,
    services::{AvailabilityService, SessionStore},
};
use mockall::mock;
use serde_json::Value;

// Mock collaborators for testing
mock! {
    pub SessionStore {}

    #[async_trait]
    impl SessionStore for SessionStore {
        async fn find_session(&self, token: &str) -> eyre::Result<Option<Session>>;
    }
}

mock! {
    pub AvailabilityService {}

    #[async_trait]
    impl AvailabilityService for AvailabilityService {
        async fn update_availability(
            &self,
            user_id: &str,
            availability: Value,
        ) -> eyre::Result<Value>;
    }
}
