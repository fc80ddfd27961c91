//! The three-tier role hierarchy.
//!
//! Roles form a total order, `User < Admin < RootAdmin`, and every access
//! decision in the workspace goes through the comparisons defined here rather
//! than matching on role names at call sites.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The privilege tier of an identity.
///
/// Variant order is significant: the derived `Ord` implementation is the
/// privilege ordering.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
  /// An end user; may sign in but holds no management rights.
  User,
  /// A delegated administrator, created only by the root identity.
  Admin,
  /// The single highest-privilege identity, bootstrapped once.
  RootAdmin,
}

impl Role {
  pub const ALL: [Role; 3] = [Role::User, Role::Admin, Role::RootAdmin];

  /// Parse the snake_case form used on the wire and in storage.
  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownRole(s.to_owned()))
  }

  /// Whether this role meets or exceeds `minimum`.
  pub fn at_least(self, minimum: Role) -> bool { self >= minimum }

  /// Whether an identity holding this role may create one holding
  /// `requested`.
  ///
  /// Only the root may create admins; admins and the root may create users;
  /// nobody creates another root (that path is the bootstrap operation).
  pub fn can_create(self, requested: Role) -> bool {
    match requested {
      Role::RootAdmin => false,
      Role::Admin => self == Role::RootAdmin,
      Role::User => self.at_least(Role::Admin),
    }
  }

  /// Whether an identity holding this role may delete one holding `target`.
  ///
  /// Admins may delete users only; identities at admin tier or above can
  /// only be removed by the root.
  pub fn can_delete(self, target: Role) -> bool {
    if !self.at_least(Role::Admin) {
      return false;
    }
    target < Role::Admin || self == Role::RootAdmin
  }
}
