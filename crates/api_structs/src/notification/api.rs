use serde::{Deserialize, Serialize};

pub mod send_purchase_confirmation {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub email: Option<String>,
        pub user_name: Option<String>,
        pub masterclass_title: Option<String>,
        pub video_title: Option<String>,
        pub amount: Option<f64>,
        pub order_id: Option<String>,
        pub payment_id: Option<String>,
        pub masterclass_id: Option<String>,
        pub purchase_type: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
    }
}

pub mod send_registration_email {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub email: Option<String>,
        pub masterclass_title: Option<String>,
        pub speaker_name: Option<String>,
        pub scheduled_date: Option<String>,
        pub masterclass_id: Option<String>,
        pub user_name: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub immediate_reminder_sent: bool,
    }
}
