use std::fmt;
use std::str::FromStr;

/// Action passed to `fbq` for standard and custom events
pub const TRACK: &str = "track";
/// Action passed to `fbq` to bind a pixel id
pub const INIT: &str = "init";

pub const GENERATE_CONTENT: &str = "GenerateContent";
pub const PUBLISH: &str = "Publish";
pub const SUBSCRIBE: &str = "Subscribe";
pub const LEAD: &str = "Lead";

/// Publishing channels content can be generated for or published to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Telegram,
    Facebook,
    Instagram,
    LinkedIn,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Telegram => "telegram",
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::LinkedIn => "linkedin",
        }
    }
}

/// Subscription plans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Free,
    Basic,
    Pro,
    Enterprise,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Basic => "basic",
            Plan::Pro => "pro",
            Plan::Enterprise => "enterprise",
        }
    }
}

/// Returned when a platform or plan name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {name:?}")]
pub struct UnknownName {
    kind: &'static str,
    name: String,
}

impl FromStr for Platform {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "telegram" => Ok(Platform::Telegram),
            "facebook" => Ok(Platform::Facebook),
            "instagram" => Ok(Platform::Instagram),
            "linkedin" => Ok(Platform::LinkedIn),
            _ => Err(UnknownName {
                kind: "platform",
                name: s.to_string(),
            }),
        }
    }
}

impl FromStr for Plan {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "basic" => Ok(Plan::Basic),
            "pro" => Ok(Plan::Pro),
            "enterprise" => Ok(Plan::Enterprise),
            _ => Err(UnknownName {
                kind: "plan",
                name: s.to_string(),
            }),
        }
    }
}

impl AsRef<str> for Platform {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Plan {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_names() {
        assert_eq!(Platform::Telegram.as_str(), "telegram");
        assert_eq!(Platform::Facebook.as_str(), "facebook");
        assert_eq!(Platform::Instagram.as_str(), "instagram");
        assert_eq!(Platform::LinkedIn.as_str(), "linkedin");
        assert_eq!(Platform::LinkedIn.to_string(), "linkedin");
    }

    #[test]
    fn test_platform_parse_is_case_insensitive() {
        assert_eq!("LinkedIn".parse::<Platform>(), Ok(Platform::LinkedIn));
        assert_eq!(" TELEGRAM ".parse::<Platform>(), Ok(Platform::Telegram));
    }

    #[test]
    fn test_platform_parse_unknown() {
        let err = "myspace".parse::<Platform>().unwrap_err();
        assert_eq!(err.to_string(), "unknown platform: \"myspace\"");
    }

    #[test]
    fn test_plan_parse() {
        let plans = [Plan::Free, Plan::Basic, Plan::Pro, Plan::Enterprise];
        for plan in plans {
            assert_eq!(plan.as_str().parse::<Plan>(), Ok(plan));
        }
        assert!("gold".parse::<Plan>().is_err());
    }
}
