//! Property-based tests for the conversation controller
//!
//! Each case drives a fresh controller on a current-thread runtime.

use super::*;
use crate::llm::testing::{EchoLlmService, MockLlmService};
use crate::session::Role;
use proptest::prelude::*;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

/// Non-blank message of at most the chat box limit
fn arb_message() -> impl Strategy<Value = String> {
    ("[ \t]{0,3}", "[a-zA-Z0-9?,.!][a-zA-Z0-9 ?,.!]{0,80}", "[ \t\n]{0,3}")
        .prop_map(|(lead, body, tail)| format!("{lead}{body}{tail}"))
}

fn arb_blank() -> impl Strategy<Value = String> {
    "[ \t\n\r]{0,10}"
}

/// Message with the keyword in some casing
fn arb_appointment_message() -> impl Strategy<Value = String> {
    (
        "[a-z ]{0,20}",
        prop_oneof![
            Just("appointment"),
            Just("Appointment"),
            Just("APPOINTMENT"),
            Just("aPpOiNtMeNt"),
        ],
        "[a-z ?]{0,20}",
    )
        .prop_map(|(pre, keyword, post)| format!("{pre}{keyword}{post}"))
}

fn seeded_session(exchanges: usize, show_form: bool) -> Session {
    let mut session = Session::new();
    for i in 0..exchanges {
        session.append_exchange(format!("q{i}"), format!("a{i}"));
    }
    session.set_show_form(show_form);
    session
}

proptest! {
    #[test]
    fn success_appends_exactly_one_exchange(
        message in arb_message(),
        prior in 0usize..4,
        flag in any::<bool>(),
    ) {
        let controller = ConversationController::new(Arc::new(EchoLlmService::new(" reply ")));
        let mut session = seeded_session(prior, flag);
        let before = session.history().len();

        let outcome = block_on(controller.handle_message(&mut session, &message)).unwrap();

        prop_assert_eq!(outcome, Outcome::Exchanged);
        let history = session.history();
        prop_assert_eq!(history.len(), before + 2);
        prop_assert_eq!(history[history.len() - 2].role(), Role::User);
        prop_assert_eq!(history[history.len() - 2].content(), message.trim());
        prop_assert_eq!(history[history.len() - 1].role(), Role::Bot);
        prop_assert_eq!(history[history.len() - 1].content(), "reply");
    }

    #[test]
    fn blank_input_changes_nothing(
        blank in arb_blank(),
        prior in 0usize..4,
        flag in any::<bool>(),
    ) {
        let mock = Arc::new(MockLlmService::new("mock"));
        let controller = ConversationController::new(mock.clone());
        let mut session = seeded_session(prior, flag);

        let outcome = block_on(controller.handle_message(&mut session, &blank)).unwrap();

        prop_assert_eq!(outcome, Outcome::Ignored);
        prop_assert_eq!(session.history().len(), prior * 2);
        prop_assert_eq!(session.show_form(), flag);
        prop_assert!(mock.recorded_requests().is_empty());
    }

    #[test]
    fn keyword_shows_form_and_it_stays_shown(
        trigger in arb_appointment_message(),
        followups in proptest::collection::vec(arb_message(), 0..4),
    ) {
        let controller = ConversationController::new(Arc::new(EchoLlmService::new("ok")));
        let mut session = Session::new();

        block_on(controller.handle_message(&mut session, &trigger)).unwrap();
        prop_assert!(session.show_form());

        for message in &followups {
            block_on(controller.handle_message(&mut session, message)).unwrap();
            prop_assert!(session.show_form());
        }
    }

    #[test]
    fn failed_call_is_atomic(
        message in prop_oneof![arb_message(), arb_appointment_message()],
        prior in 0usize..4,
        flag in any::<bool>(),
    ) {
        // An empty mock queue answers with a network error
        let controller = ConversationController::new(Arc::new(MockLlmService::new("mock")));
        let mut session = seeded_session(prior, flag);
        let before: Vec<String> = session.history().iter().map(|m| m.content().to_string()).collect();

        let result = block_on(controller.handle_message(&mut session, &message));

        prop_assert!(result.is_err());
        let after: Vec<String> = session.history().iter().map(|m| m.content().to_string()).collect();
        prop_assert_eq!(after, before);
        prop_assert_eq!(session.show_form(), flag);
    }
}
