//! Maps UI service errors to weathernow_core::AppError for consistent user-facing messages.

mod weather;
