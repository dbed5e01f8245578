//! CounterService: get/increment/reset/set over a CounterStore.

mod counter;
mod validation;
pub use counter::CounterService;
pub use validation::validate_set_request;
