//! # LinkedIn Entity Module
//!
//! The five kinds of public LinkedIn page this crate scrapes. Each kind is a
//! plain data struct with a static field table (`Record`) and a field mapping
//! from a parsed page (`Extract`). The kinds share nothing else.
//!
//! ## Key Components
//!
//! - `Company`: company overview page
//! - `Job`: job posting, either a job page or a card from the guest job search
//! - `Post`: feed post
//! - `Pulse`: long-form article
//! - `User`: member profile

mod company;
mod job;
mod post;
mod pulse;
mod user;

pub use company::Company;
pub use job::Job;
pub use post::Post;
pub use pulse::Pulse;
pub use user::User;
