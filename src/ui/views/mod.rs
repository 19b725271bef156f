pub mod home;
pub mod progress;
pub mod quiz;
pub mod results;
pub mod review;
pub mod sign_in;
