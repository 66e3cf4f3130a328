use serde::{Deserialize, Serialize};

use crate::enum_display_fromstr;
use crate::error::ScopeError;

/// Directory holding local configuration.
pub const CONFIG_DIR: &str = ".rivalscope";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
}

enum_display_fromstr!(Platform, ScopeError::invalid_platform, {
    Ios => "ios",
    Android => "android",
});

/// Who a review or promo is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Driver,
    Rider,
    #[default]
    Unknown,
}

enum_display_fromstr!(Role, ScopeError::invalid_role, {
    Driver => "driver",
    Rider => "rider",
    Unknown => "unknown",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

enum_display_fromstr!(Sentiment, ScopeError::invalid_sentiment, {
    Positive => "positive",
    Neutral => "neutral",
    Negative => "negative",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Percent,
    Fixed,
    FreeRide,
}

enum_display_fromstr!(DiscountType, ScopeError::invalid_vocabulary, {
    Percent => "percent",
    Fixed => "fixed",
    FreeRide => "free_ride",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    Major,
    Minor,
    Bugfix,
}

enum_display_fromstr!(Significance, ScopeError::invalid_vocabulary, {
    Major => "major",
    Minor => "minor",
    Bugfix => "bugfix",
});

/// Outcome of one collection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Partial,
    Failed,
}

enum_display_fromstr!(RunStatus, ScopeError::invalid_collection_status, {
    Success => "success",
    Partial => "partial",
    Failed => "failed",
});

/// Latest status of a collection source; `Never` when it has not run yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Success,
    Partial,
    Warning,
    Failed,
    #[default]
    Never,
}

enum_display_fromstr!(SourceStatus, ScopeError::invalid_collection_status, {
    Success => "success",
    Partial => "partial",
    Warning => "warning",
    Failed => "failed",
    Never => "never",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    #[default]
    Healthy,
    Warning,
    Error,
}

enum_display_fromstr!(Health, ScopeError::invalid_vocabulary, {
    Healthy => "healthy",
    Warning => "warning",
    Error => "error",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TariffKind {
    Driver,
    Rider,
}

enum_display_fromstr!(TariffKind, ScopeError::invalid_vocabulary, {
    Driver => "driver",
    Rider => "rider",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestFormat {
    Markdown,
    Pdf,
}

enum_display_fromstr!(DigestFormat, ScopeError::invalid_vocabulary, {
    Markdown => "markdown",
    Pdf => "pdf",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_round_trip() {
        assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!(Platform::Android.to_string(), "android");
        assert!("windows".parse::<Platform>().is_err());
    }

    #[test]
    fn test_serde_matches_display() {
        let json = serde_json::to_string(&DiscountType::FreeRide).unwrap();
        assert_eq!(json, "\"free_ride\"");
        let status: SourceStatus = serde_json::from_str("\"never\"").unwrap();
        assert_eq!(status.as_str(), "never");
    }

    #[test]
    fn test_role_error_names_choices() {
        let err = "admin".parse::<Role>().unwrap_err();
        assert!(err.to_string().contains("driver, rider or unknown"));
    }
}
