use serde::{Deserialize, Serialize};

pub mod get_service_health {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        /// Current server time in millis
        pub server_time: i64,
        /// Timezone used to interpret recurring reminder times
        pub timezone: String,
    }
}
