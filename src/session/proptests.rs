//! Property-based tests for the session store

use super::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Append(String, String),
    ShowForm(bool),
    Reset,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => ("[a-zA-Z0-9 ?]{0,40}", "[a-zA-Z0-9 .]{0,40}").prop_map(|(u, b)| Op::Append(u, b)),
        2 => any::<bool>().prop_map(Op::ShowForm),
        1 => Just(Op::Reset),
    ]
}

fn apply(session: &mut Session, op: &Op) {
    match op {
        Op::Append(user, bot) => session.append_exchange(user.clone(), bot.clone()),
        Op::ShowForm(flag) => session.set_show_form(*flag),
        Op::Reset => session.reset(),
    }
}

proptest! {
    #[test]
    fn history_length_stays_even(ops in proptest::collection::vec(arb_op(), 0..30)) {
        let mut session = Session::new();
        for op in &ops {
            apply(&mut session, op);
            prop_assert_eq!(session.history().len() % 2, 0);
        }
    }

    #[test]
    fn roles_alternate_user_then_bot(ops in proptest::collection::vec(arb_op(), 0..30)) {
        let mut session = Session::new();
        for op in &ops {
            apply(&mut session, op);
        }
        for pair in session.history().chunks(2) {
            prop_assert_eq!(pair[0].role(), Role::User);
            prop_assert_eq!(pair[1].role(), Role::Bot);
        }
    }

    #[test]
    fn append_preserves_earlier_entries(
        ops in proptest::collection::vec(arb_op(), 0..20),
        user in "[a-z ]{1,20}",
        bot in "[a-z ]{1,20}",
    ) {
        let mut session = Session::new();
        for op in &ops {
            apply(&mut session, op);
        }
        let before: Vec<String> = session.history().iter().map(|m| m.content().to_string()).collect();
        let flag = session.show_form();

        session.append_exchange(user.clone(), bot.clone());

        let after: Vec<&str> = session.history().iter().map(Message::content).collect();
        prop_assert_eq!(after.len(), before.len() + 2);
        prop_assert!(before.iter().zip(&after).all(|(b, a)| b == a));
        prop_assert_eq!(after[after.len() - 2], user.as_str());
        prop_assert_eq!(after[after.len() - 1], bot.as_str());
        prop_assert_eq!(session.show_form(), flag);
    }

    #[test]
    fn reset_always_clears(ops in proptest::collection::vec(arb_op(), 0..30)) {
        let mut session = Session::new();
        for op in &ops {
            apply(&mut session, op);
        }
        session.reset();
        prop_assert!(session.history().is_empty());
        prop_assert!(!session.show_form());
    }
}
