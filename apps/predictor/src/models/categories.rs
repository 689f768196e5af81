//! Closed category sets accepted by the prediction service.
//!
//! Each set serializes as its display label, which is also the wire value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::FormError;

macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = FormError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| FormError::NotInSet {
                        field: $field,
                        value: s.to_string(),
                        allowed: Self::ALL.iter().map(|v| v.as_str()).collect(),
                    })
            }
        }
    };
}

closed_set! {
    EducationLevel, "education_level" {
        HighSchool => "High School",
        Bachelor => "Bachelor",
        Master => "Master",
        PhD => "PhD",
    }
}

closed_set! {
    JobTitle, "job_title" {
        BackendEngineer => "Backend Engineer",
        DataAnalyst => "Data Analyst",
        DataScientist => "Data Scientist",
        MlEngineer => "ML Engineer",
        FullStackEngineer => "Full Stack Engineer",
        SoftwareDeveloper => "Software Developer",
        Other => "Other",
    }
}

closed_set! {
    City, "city" {
        Bengaluru => "Bengaluru",
        Hyderabad => "Hyderabad",
        Pune => "Pune",
        Mumbai => "Mumbai",
        Chennai => "Chennai",
        DelhiNcr => "Delhi NCR",
    }
}

closed_set! {
    CompanySize, "company_size" {
        Small => "Small",
        Medium => "Medium",
        Large => "Large",
    }
}
