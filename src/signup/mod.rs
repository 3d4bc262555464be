//! The account-registration flow: field vocabulary, step table, input
//! rules, and the side effects that talk to the verification backend.

pub mod effects;
pub mod flow;
pub mod payload;
pub mod rules;

pub use effects::SignupEffects;
pub use flow::{signup_failure_notice, signup_table, signup_wizard};
pub use payload::register_request;

/// Answer-field vocabulary for the registration flow.
pub mod keys {
    pub const ROLE: &str = "role";
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const EMAIL: &str = "email";
    pub const CONFIRM_EMAIL: &str = "confirmEmail";
    pub const VALID_CODE: &str = "validCode";
    pub const CONFIRM_CODE: &str = "cValidCode";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirmPassword";
}

/// Account roles selectable on the first step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Organizer,
    Musician,
}

impl Role {
    /// Backend role id (`roll` in the register payload).
    pub fn id(self) -> u32 {
        match self {
            Role::Organizer => 1,
            Role::Musician => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Organizer => "Organizer",
            Role::Musician => "Musician",
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Role::Organizer),
            2 => Some(Role::Musician),
            _ => None,
        }
    }
}
