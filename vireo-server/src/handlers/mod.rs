pub mod health;
pub mod items;
pub mod latest;
pub mod params;
pub mod personalization;
