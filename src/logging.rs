// Macros file - tracing macros are imported within the macro definitions

/// Standardized logging macros for consistent field names and message patterns across the application
///
/// These macros ensure:
/// - Consistent field naming conventions
/// - Appropriate logging levels for different scenarios
/// - Structured logging with context
/// - Consistent message formatting

// ============================================================================
// API Operation Logging Macros
// ============================================================================

/// Log the start of an API operation with consistent fields
#[macro_export]
macro_rules! log_api_start {
    ($operation:expr, student_id = $student_id:expr) => {
        tracing::debug!(
            operation = $operation,
            student_id = %$student_id,
            "API operation started"
        );
    };
    ($operation:expr, assessment_id = $assessment_id:expr) => {
        tracing::debug!(
            operation = $operation,
            assessment_id = %$assessment_id,
            "API operation started"
        );
    };
    ($operation:expr) => {
        tracing::debug!(
            operation = $operation,
            "API operation started"
        );
    };
}

/// Log successful completion of an API operation
#[macro_export]
macro_rules! log_api_success {
    ($operation:expr, student_id = $student_id:expr, $msg:expr) => {
        tracing::info!(
            operation = $operation,
            student_id = %$student_id,
            "API operation completed: {}", $msg
        );
    };
    ($operation:expr, assessment_id = $assessment_id:expr, $msg:expr) => {
        tracing::info!(
            operation = $operation,
            assessment_id = %$assessment_id,
            "API operation completed: {}", $msg
        );
    };
    ($operation:expr, $msg:expr) => {
        tracing::info!(
            operation = $operation,
            "API operation completed: {}", $msg
        );
    };
}

/// Log API operation errors with consistent structure
#[macro_export]
macro_rules! log_api_error {
    ($operation:expr, student_id = $student_id:expr, error = $error:expr, $msg:expr) => {
        tracing::error!(
            operation = $operation,
            student_id = %$student_id,
            error = %$error,
            "API operation failed: {}", $msg
        );
    };
    ($operation:expr, error = $error:expr, $msg:expr) => {
        tracing::error!(
            operation = $operation,
            error = %$error,
            "API operation failed: {}", $msg
        );
    };
}

/// Log API warnings with context
#[macro_export]
macro_rules! log_api_warn {
    ($operation:expr, student_id = $student_id:expr, $msg:expr) => {
        tracing::warn!(
            operation = $operation,
            student_id = %$student_id,
            "API operation warning: {}", $msg
        );
    };
    ($operation:expr, $msg:expr) => {
        tracing::warn!(
            operation = $operation,
            "API operation warning: {}", $msg
        );
    };
}

// ============================================================================
// Pipeline Stage Logging Macros
// ============================================================================

/// Debug-level trace for each stage of the result pipeline (resolution
/// attempt, fallback used, category processed)
#[macro_export]
macro_rules! log_pipeline_stage {
    ($stage:expr, identifier = $identifier:expr, $msg:expr) => {
        tracing::debug!(
            component = "pipeline",
            stage = $stage,
            identifier = %$identifier,
            "{}", $msg
        );
    };
    ($stage:expr, student_id = $student_id:expr, $msg:expr) => {
        tracing::debug!(
            component = "pipeline",
            stage = $stage,
            student_id = %$student_id,
            "{}", $msg
        );
    };
    ($stage:expr, $msg:expr) => {
        tracing::debug!(
            component = "pipeline",
            stage = $stage,
            "{}", $msg
        );
    };
}

// ============================================================================
// Store Operation Logging Macros
// ============================================================================

/// Log store operation results
#[macro_export]
macro_rules! log_store_operation {
    (debug, $operation:expr, link_value = $link_value:expr, found = $found:expr) => {
        tracing::debug!(
            component = "store",
            operation = $operation,
            link_value = %$link_value,
            found = $found,
            "Store operation completed"
        );
    };
    (info, $operation:expr, $msg:expr) => {
        tracing::info!(
            component = "store",
            operation = $operation,
            "Store operation: {}", $msg
        );
    };
    (error, $operation:expr, error = $error:expr) => {
        tracing::error!(
            component = "store",
            operation = $operation,
            error = %$error,
            "Store operation failed"
        );
    };
}

// ============================================================================
// System Event Logging Macros
// ============================================================================

/// Log system startup and shutdown events
#[macro_export]
macro_rules! log_system_event {
    (startup, component = $component:expr, $msg:expr) => {
        tracing::info!(
            event_type = "startup",
            component = $component,
            "System event: {}",
            $msg
        );
    };
    (shutdown, component = $component:expr, $msg:expr) => {
        tracing::info!(
            event_type = "shutdown",
            component = $component,
            "System event: {}",
            $msg
        );
    };
    (config, $msg:expr) => {
        tracing::info!(event_type = "configuration", "System event: {}", $msg);
    };
}

// ============================================================================
// Validation Logging Macros
// ============================================================================

/// Log validation results consistently
#[macro_export]
macro_rules! log_validation {
    (success, $component:expr, $msg:expr) => {
        tracing::debug!(
            event_type = "validation",
            component = $component,
            result = "success",
            "Validation completed: {}", $msg
        );
    };
    (failure, $component:expr, error = $error:expr) => {
        tracing::warn!(
            event_type = "validation",
            component = $component,
            result = "failure",
            error = %$error,
            "Validation failed"
        );
    };
}
