//! Common data types used throughout the application

pub mod avatar;
pub mod user;

pub use avatar::{
    AvatarList, AvatarProfile, MeasurementMap, MorphTarget, ProfileMutation, QuickModeSettings,
};
pub use user::UserContext;
