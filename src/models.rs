use serde::Serialize;
use std::fmt;

/// Opaque friend identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FriendId(pub u64);

impl fmt::Display for FriendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A friend and the running balance between them and the user.
///
/// Negative balance: the user owes the friend. Positive: the friend owes the user.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Friend {
    pub id: FriendId,
    pub name: String,
    pub image: String,
    pub balance: f64,
}

impl Friend {
    pub fn new(id: FriendId, name: impl Into<String>, image: impl Into<String>) -> Self {
        Friend {
            id,
            name: name.into(),
            image: image.into(),
            balance: 0.0,
        }
    }

    fn seeded(id: u64, name: &str, balance: f64) -> Self {
        Friend {
            id: FriendId(id),
            name: name.to_string(),
            image: format!("{}?u={}", crate::constants::DEFAULT_IMAGE_URL, id),
            balance,
        }
    }

    pub fn balance_status(&self) -> BalanceStatus {
        BalanceStatus::of(self.balance)
    }

    /// Human-readable balance line, e.g. "You owe Clark 7$"
    pub fn balance_text(&self) -> String {
        match self.balance_status() {
            BalanceStatus::YouOwe(amount) => format!("You owe {} {}$", self.name, amount),
            BalanceStatus::OwesYou(amount) => format!("{} owes you {}$", self.name, amount),
            BalanceStatus::Even => format!("You and {} are even", self.name),
        }
    }
}

/// The three friends every session starts with
pub fn seed_friends() -> Vec<Friend> {
    vec![
        Friend::seeded(118836, "Clark", -7.0),
        Friend::seeded(933372, "Sarah", 20.0),
        Friend::seeded(499476, "Anthony", 0.0),
    ]
}

/// Sign of a balance, carrying the absolute amount
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BalanceStatus {
    YouOwe(f64),
    OwesYou(f64),
    Even,
}

impl BalanceStatus {
    pub fn of(balance: f64) -> Self {
        if balance < 0.0 {
            BalanceStatus::YouOwe(balance.abs())
        } else if balance > 0.0 {
            BalanceStatus::OwesYou(balance)
        } else {
            BalanceStatus::Even
        }
    }
}

/// Who pays the bill
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Payer {
    #[default]
    User,
    Friend,
}

impl Payer {
    pub fn toggle(&self) -> Payer {
        match self {
            Payer::User => Payer::Friend,
            Payer::Friend => Payer::User,
        }
    }
}
