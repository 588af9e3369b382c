//! Application services

mod route_search_service;

pub use route_search_service::RouteSearchService;
