//! The tutorial lessons, one router each.
//!
//! Every `router()` builds a fresh, freshly seeded store, so two routers
//! never share rows.

pub mod api_router;
pub mod catalog;
pub mod error_handling;
pub mod full_crud;
pub mod path_parameters;
pub mod request_models;
pub mod response_models;
pub mod social;

use clap::ValueEnum;

use crate::Router;

/// Which lesson the binary serves.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Lesson {
    PathParameters,
    FullCrud,
    ApiRouter,
    ErrorHandling,
    RequestModels,
    ResponseModels,
    Social,
}

impl Lesson {
    pub fn router(self) -> Router {
        match self {
            Self::PathParameters => path_parameters::router(),
            Self::FullCrud       => full_crud::router(),
            Self::ApiRouter      => api_router::router(),
            Self::ErrorHandling  => error_handling::router(),
            Self::RequestModels  => request_models::router(),
            Self::ResponseModels => response_models::router(),
            Self::Social         => social::router(),
        }
    }
}
