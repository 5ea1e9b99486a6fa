/// What kind of content a purchase confirmation is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseType {
    /// A single recorded video of a masterclass
    Video,
    /// A seat in a masterclass that has not taken place yet
    UpcomingRegistration,
    /// Access to a recorded masterclass
    Masterclass,
}

impl PurchaseType {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("video") => Self::Video,
            Some("upcoming_registration") => Self::UpcomingRegistration,
            _ => Self::Masterclass,
        }
    }
}

/// A completed purchase or free enrollment that should be confirmed to the buyer
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub user_name: String,
    pub masterclass_title: String,
    pub video_title: Option<String>,
    pub amount: f64,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub masterclass_id: Option<String>,
    pub purchase_type: PurchaseType,
}

impl Purchase {
    pub fn is_paid(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_video(&self) -> bool {
        self.purchase_type == PurchaseType::Video
    }

    pub fn is_upcoming_registration(&self) -> bool {
        self.purchase_type == PurchaseType::UpcomingRegistration
    }

    /// Title of the purchased item, the video title for video purchases
    pub fn item_title(&self) -> &str {
        match (&self.video_title, self.is_video()) {
            (Some(video_title), true) => video_title,
            _ => &self.masterclass_title,
        }
    }

    pub fn formatted_amount(&self) -> String {
        format_amount(self.amount)
    }
}

/// Formats a rupee amount, whole amounts are shown without decimals
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.2}", amount)
    }
}
