//! Allergen and contraindication screening of ingredient lists.
//!
//! Medical profile text is split into a [`token_set::TokenSet`]. Each
//! ingredient name is matched against it by substring
//! ([`screener::screen`]). A stored analysis payload is rebuilt from its
//! ingredient names ([`rescreener::rescreen`]). [`services`] applies that to
//! one record or to every record a user owns.

pub mod entities;
pub mod ports;
pub mod rescreener;
pub mod screener;
pub mod services;
pub mod token_set;
