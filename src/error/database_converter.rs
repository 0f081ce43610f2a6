use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Converts Diesel errors into structured `AppError` variants.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// `operation` names the failed call and only surfaces in logs.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::not_found("Resource", "id", "unknown"),
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let text = match info.details() {
            Some(details) => format!("{}\n{}", info.message(), details),
            None => info.message().to_string(),
        };
        let constraint_name = info.constraint_name();

        let parsed = match kind {
            DatabaseErrorKind::UniqueViolation => {
                ConstraintParser::parse_unique_violation(&text, constraint_name).map(
                    |(entity, field, value)| AppError::Duplicate {
                        entity,
                        field,
                        value,
                    },
                )
            }
            DatabaseErrorKind::NotNullViolation => {
                ConstraintParser::parse_not_null_violation(&text).map(|(entity, field)| {
                    AppError::Validation {
                        field,
                        reason: format!("Field is required for {}", entity),
                    }
                })
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                ConstraintParser::parse_foreign_key_violation(&text, constraint_name).map(|fk| {
                    let reason = if fk.still_referenced {
                        format!("Record is still referenced from {}", fk.table)
                    } else {
                        format!("Referenced record '{}' does not exist", fk.value)
                    };
                    AppError::Validation {
                        field: fk.field,
                        reason,
                    }
                })
            }
            DatabaseErrorKind::CheckViolation => {
                ConstraintParser::parse_check_violation(&text, constraint_name).map(
                    |(entity, field)| AppError::Validation {
                        field,
                        reason: format!("Check constraint failed for {}", entity),
                    },
                )
            }
            _ => None,
        };

        parsed.unwrap_or_else(|| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::msg(format!("{:?}: {}", kind, text)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: &'static str,
        details: Option<&'static str>,
        constraint_name: Option<&'static str>,
    }

    impl DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            self.message
        }

        fn details(&self) -> Option<&str> {
            self.details
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn db_error(kind: DatabaseErrorKind, info: MockDatabaseErrorInfo) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(info))
    }

    #[test]
    fn test_convert_not_found_error() {
        let result = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find");
        assert!(matches!(result, AppError::NotFound { .. }));
    }

    #[test]
    fn test_unique_violation_becomes_duplicate() {
        let error = db_error(
            DatabaseErrorKind::UniqueViolation,
            MockDatabaseErrorInfo {
                message: "duplicate key value violates unique constraint \"users_email_key\"",
                details: Some("Key (email)=(ann@example.com) already exists."),
                constraint_name: Some("users_email_key"),
            },
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert user") {
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "users");
                assert_eq!(field, "email");
                assert_eq!(value, "ann@example.com");
            }
            other => panic!("Expected Duplicate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_foreign_key_on_delete_becomes_validation() {
        let error = db_error(
            DatabaseErrorKind::ForeignKeyViolation,
            MockDatabaseErrorInfo {
                message: "update or delete on table \"categories\" violates foreign key constraint \"products_category_id_fkey\" on table \"products\"",
                details: Some("Key (id)=(0b5c) is still referenced from table \"products\"."),
                constraint_name: Some("products_category_id_fkey"),
            },
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "delete category") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "category_id");
                assert!(reason.contains("still referenced"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_error_falls_back_to_database() {
        let error = db_error(
            DatabaseErrorKind::SerializationFailure,
            MockDatabaseErrorInfo {
                message: "could not serialize access",
                details: None,
                constraint_name: None,
            },
        );

        assert!(matches!(
            DatabaseErrorConverter::convert_diesel_error(error, "update"),
            AppError::Database { operation, .. } if operation == "update"
        ));
    }
}
