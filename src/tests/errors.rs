// Unit Tests for the Cause Aggregate
//
// UNIT UNDER TEST: Errors
//
// BUSINESS RESPONSIBILITY:
//   - Holds zero, one, or many underlying errors in insertion order
//   - Delegates every accessor transparently when exactly one is held
//   - Synthesizes the numbered MULTIPLE ERRORS report otherwise
//   - Stays safe under concurrent append/read from multiple threads
//
// TEST COVERAGE:
//   - Report rendering for 0, 1, and 2+ elements
//   - Length accounting, including the defensive double-wrap collapse
//   - Queue operations (append/pop/shift) and their empty-aggregate behavior
//   - Code/message/cause/stack delegation and multi-error fallbacks
//   - RPC status delegation and the synthesized Unknown status
//   - Concurrent mutation

use std::thread;

use tonic::{Code, Status};

use crate::tests::helpers::PlainError;
use crate::{Error, Errors};

fn plain_causes(texts: &[&'static str]) -> Errors {
    let errs = Errors::new();
    for text in texts {
        errs.push(PlainError(text));
    }
    errs
}

#[cfg(test)]
mod report_rendering_tests {
    use super::*;

    #[test]
    fn test_empty_aggregate_renders_nothing() {
        assert_eq!(Errors::new().to_string(), "");
    }

    #[test]
    fn test_single_element_renders_its_own_text() {
        let errs = plain_causes(&["foo"]);
        assert_eq!(errs.to_string(), "foo");
    }

    #[test]
    fn test_multiple_elements_render_numbered_report() {
        let errs = plain_causes(&["foo", "bar"]);
        assert_eq!(errs.to_string(), "MULTIPLE ERRORS.\n#1: foo\n#2: bar");
    }

    #[test]
    fn test_numbering_follows_insertion_order() {
        let errs = plain_causes(&["first", "second", "third"]);
        assert_eq!(
            errs.to_string(),
            "MULTIPLE ERRORS.\n#1: first\n#2: second\n#3: third"
        );
    }
}

#[cfg(test)]
mod length_tests {
    use super::*;

    #[test]
    fn test_len_counts_elements() {
        assert_eq!(Errors::new().len(), 0);
        assert_eq!(plain_causes(&["foo"]).len(), 1);
        assert_eq!(plain_causes(&["foo", "bar"]).len(), 2);
    }

    #[test]
    fn test_append_none_is_a_no_op() {
        // Arrange
        let errs = plain_causes(&["foo"]);

        // Act
        errs.append(None);

        // Assert
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn test_sole_empty_nested_aggregate_collapses_to_empty() {
        // Wrapping an empty aggregate must behave exactly like no cause
        // (defends against double-wrapping at construction sites)

        // Arrange
        let outer = Errors::new();
        outer.push(Errors::new());

        // Assert
        assert_eq!(outer.len(), 0);
        assert!(outer.is_empty());
        assert_eq!(outer.code(), 200);
        assert_eq!(outer.to_string(), "");
        assert!(outer.cause().is_none());
        assert!(outer.grpc_status().is_none());
    }
}

#[cfg(test)]
mod queue_operation_tests {
    use super::*;

    #[test]
    fn test_append_grows_the_tail() {
        let errs = Errors::new();
        errs.push(PlainError("foo"));
        errs.push(PlainError("bar"));
        errs.push(PlainError("baz"));

        assert_eq!(errs.len(), 3);
        assert_eq!(errs.to_string(), "MULTIPLE ERRORS.\n#1: foo\n#2: bar\n#3: baz");
    }

    #[test]
    fn test_pop_removes_the_tail() {
        // Arrange
        let errs = plain_causes(&["foo", "bar"]);

        // Act
        let popped = errs.pop();

        // Assert
        assert_eq!(popped.unwrap().to_string(), "bar");
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn test_shift_removes_the_head() {
        // Arrange
        let errs = plain_causes(&["foo", "bar"]);

        // Act
        let shifted = errs.shift();

        // Assert
        assert_eq!(shifted.unwrap().to_string(), "foo");
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn test_pop_and_shift_on_empty_return_none() {
        let errs = Errors::new();
        assert!(errs.pop().is_none());
        assert!(errs.shift().is_none());
        assert_eq!(errs.len(), 0);
    }

    #[test]
    fn test_shift_down_to_single_element_restores_delegation() {
        // Delegation must hold even after mutation brings the count to one

        // Arrange
        let errs = Errors::new();
        errs.push(PlainError("foo"));
        errs.push(Error::unavailable("backend drain"));

        // Act
        let _ = errs.shift();

        // Assert: the surviving element is the Unavailable error
        assert_eq!(errs.len(), 1);
        assert_eq!(errs.code(), 503);
        assert!(errs.is_temporary());
    }
}

#[cfg(test)]
mod delegation_tests {
    use super::*;

    #[test]
    fn test_single_wrapped_error_delegates_every_accessor() {
        // Arrange
        let inner = Error::unavailable("backend drain");
        let errs = Errors::new();
        errs.push(inner.clone());

        // Assert: round-trip against the element's own accessors
        assert_eq!(errs.code(), inner.code());
        assert_eq!(errs.message(), inner.message());
        assert_eq!(errs.is_timeout(), inner.is_timeout());
        assert_eq!(errs.is_temporary(), inner.is_temporary());
        assert!(!errs.stack().is_empty());

        let status = errs.grpc_status().unwrap();
        assert_eq!(status.code(), Code::Unavailable);
        assert_eq!(status.message(), inner.server_message());
    }

    #[test]
    fn test_code_for_empty_aggregate_is_200() {
        assert_eq!(Errors::new().code(), 200);
    }

    #[test]
    fn test_code_for_multiple_elements_is_500() {
        assert_eq!(plain_causes(&["foo", "bar"]).code(), 500);
    }

    #[test]
    fn test_code_for_unclassifiable_single_element_is_500() {
        assert_eq!(plain_causes(&["foo"]).code(), 500);
    }

    #[test]
    fn test_code_maps_foreign_rpc_status_through_the_table() {
        // A bare tonic::Status as sole element classifies via rpc->http
        let expected: [(Code, u16); 16] = [
            (Code::Aborted, 409),
            (Code::AlreadyExists, 409),
            (Code::Cancelled, 499),
            (Code::DataLoss, 500),
            (Code::DeadlineExceeded, 504),
            (Code::FailedPrecondition, 400),
            (Code::Internal, 500),
            (Code::InvalidArgument, 400),
            (Code::NotFound, 404),
            (Code::OutOfRange, 400),
            (Code::PermissionDenied, 403),
            (Code::ResourceExhausted, 429),
            (Code::Unauthenticated, 401),
            (Code::Unavailable, 503),
            (Code::Unimplemented, 501),
            (Code::Unknown, 500),
        ];

        for (code, http) in expected {
            let errs = Errors::new();
            errs.push(Status::new(code, "foo bar"));
            assert_eq!(errs.code(), http, "delegated code for {code:?}");
        }
    }

    #[test]
    fn test_message_delegation() {
        assert_eq!(Errors::new().message(), "");
        assert_eq!(plain_causes(&["foo"]).message(), "foo");
        assert_eq!(plain_causes(&["foo", "bar"]).message(), "MULTIPLE ERRORS.");

        let errs = Errors::new();
        errs.push(Error::internal("foo"));
        assert_eq!(errs.message(), "INTERNAL ERROR. foo");
    }

    #[test]
    fn test_cause_unwraps_a_single_element() {
        // An aggregate of one is transparent: it exposes the element's own
        // nested cause, never the element itself

        assert!(Errors::new().cause().is_none());
        assert!(plain_causes(&["foo"]).cause().is_none());

        let errs = Errors::new();
        errs.push(Error::internal("foo").with_cause(PlainError("disk gone")));
        let cause = errs.cause().expect("nested cause must surface");
        assert_eq!(cause.to_string(), "disk gone");
    }

    #[test]
    fn test_cause_for_multiple_elements_is_the_aggregate_itself() {
        let errs = plain_causes(&["foo", "bar"]);
        let cause = errs.cause().expect("aggregate is its own cause");
        assert_eq!(cause.to_string(), "MULTIPLE ERRORS.\n#1: foo\n#2: bar");
    }

    #[test]
    fn test_stack_only_surfaces_for_a_single_capturing_element() {
        assert!(Errors::new().stack().is_empty());
        assert!(plain_causes(&["foo"]).stack().is_empty());
        assert!(plain_causes(&["foo", "bar"]).stack().is_empty());

        let errs = Errors::new();
        errs.push(Error::internal("foo"));
        assert!(!errs.stack().is_empty());
    }

    #[test]
    fn test_timeout_and_temporary_probe_the_head_element() {
        let cancelled = Errors::new();
        cancelled.push(Error::cancelled("foo"));
        assert!(cancelled.is_timeout());

        let unavailable = Errors::new();
        unavailable.push(Error::unavailable("foo"));
        assert!(unavailable.is_temporary());

        let plains = plain_causes(&["foo", "bar"]);
        assert!(!plains.is_timeout());
        assert!(!plains.is_temporary());
    }
}

#[cfg(test)]
mod rpc_status_tests {
    use super::*;

    #[test]
    fn test_empty_aggregate_has_no_rpc_status() {
        assert!(Errors::new().grpc_status().is_none());
    }

    #[test]
    fn test_single_classified_element_delegates_status() {
        let errs = Errors::new();
        errs.push(Error::not_found("foo"));

        let status = errs.grpc_status().unwrap();
        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status.message(), "NOT FOUND. foo");
    }

    #[test]
    fn test_unclassifiable_single_element_synthesizes_unknown() {
        let errs = plain_causes(&["foo"]);

        let status = errs.grpc_status().unwrap();
        assert_eq!(status.code(), Code::Unknown);
        assert_eq!(status.message(), "foo");
    }

    #[test]
    fn test_multiple_elements_synthesize_unknown_with_report() {
        let errs = plain_causes(&["foo", "bar"]);

        let status = errs.grpc_status().unwrap();
        assert_eq!(status.code(), Code::Unknown);
        assert_eq!(status.message(), "MULTIPLE ERRORS.\n#1: foo\n#2: bar");
    }
}

#[cfg(test)]
mod concurrency_tests {
    use super::*;

    #[test]
    fn test_concurrent_appends_from_parallel_subtasks() {
        // The aggregate is the shared failure accumulator pattern: many
        // workers append, one consumer reads

        // Arrange
        let errs = Errors::new();

        // Act
        thread::scope(|scope| {
            for _ in 0..8 {
                let handle = errs.clone();
                scope.spawn(move || {
                    for _ in 0..100 {
                        handle.push(PlainError("worker failure"));
                        let _ = handle.len();
                    }
                });
            }
        });

        // Assert
        assert_eq!(errs.len(), 800);
        assert_eq!(errs.code(), 500);
    }
}
