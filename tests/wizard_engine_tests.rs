mod common;

use std::sync::Arc;

use common::{
    challenge, fill_code, fill_email, fill_names, fill_password, pick_role, register_reply,
    wizard, MemoryTokenStore, ScriptedService,
};
use onboard_core::signup::{keys, signup_table, Role};
use onboard_core::wizard::{
    AdvanceOutcome, AnswerError, AnswerStore, AnswerValue, WizardState, MAX_TEXT_LEN,
};

fn signup_store() -> AnswerStore {
    AnswerStore::new(signup_table().field_keys().collect::<Vec<_>>())
}

#[tokio::test]
async fn step_index_stays_within_bounds_for_a_full_walk() {
    let service = Arc::new(ScriptedService::new());
    let tokens = Arc::new(MemoryTokenStore::new());
    service.queue_email(Ok(challenge(1)));
    service.queue_confirm(Ok(()));
    service.queue_register(Ok(register_reply("tok")));

    let total = signup_table().len();
    let mut wizard = wizard(service, tokens);

    let check_bounds = |state: &WizardState| {
        if let Some(step) = state.step() {
            assert!(step < total, "step {step} escaped the table of {total}");
        }
    };

    check_bounds(wizard.state());
    pick_role(&mut wizard, Role::Organizer);
    wizard.submit().await.unwrap();
    check_bounds(wizard.state());
    fill_names(&mut wizard, "Ana", "Reyes");
    wizard.submit().await.unwrap();
    check_bounds(wizard.state());
    fill_email(&mut wizard, "ana@example.com", "ana@example.com");
    wizard.submit().await.unwrap();
    check_bounds(wizard.state());
    fill_code(&mut wizard, "123456", "123456");
    wizard.submit().await.unwrap();
    check_bounds(wizard.state());
    fill_password(&mut wizard, "Abcdef1!", "Abcdef1!");
    wizard.submit().await.unwrap();
    assert!(wizard.state().is_terminal());
}

#[tokio::test]
async fn movement_is_always_by_exactly_one_step() {
    let service = Arc::new(ScriptedService::new());
    let tokens = Arc::new(MemoryTokenStore::new());
    let mut wizard = wizard(service, tokens);

    assert_eq!(*wizard.state(), WizardState::Idle(0));
    pick_role(&mut wizard, Role::Musician);
    wizard.submit().await.unwrap();
    assert_eq!(*wizard.state(), WizardState::Idle(1));
    wizard.back();
    assert_eq!(*wizard.state(), WizardState::Idle(0));
    wizard.back();
    assert_eq!(*wizard.state(), WizardState::Idle(0));
}

#[test]
fn validation_is_idempotent_across_repeated_calls() {
    let mut store = signup_store();
    store
        .patch(vec![
            (keys::EMAIL, AnswerValue::Text("a@b.com".into())),
            (keys::CONFIRM_EMAIL, AnswerValue::Text("a@b.com".into())),
        ])
        .unwrap();

    let table = signup_table();
    let step = table.describe(2).unwrap();
    let first = step.validate(store.answers());
    let second = step.validate(store.answers());
    assert_eq!(first, second);
}

#[test]
fn reset_clears_every_previously_set_field() {
    let mut store = signup_store();
    store
        .patch(vec![
            (keys::FIRST_NAME, AnswerValue::Text("Ana".into())),
            (keys::LAST_NAME, AnswerValue::Text("Reyes".into())),
            (keys::EMAIL, AnswerValue::Text("a@b.com".into())),
        ])
        .unwrap();
    store.reset();
    for field in [keys::FIRST_NAME, keys::LAST_NAME, keys::EMAIL] {
        assert!(store.get(field).is_none());
    }
}

#[test]
fn free_text_writes_are_capped_at_sixty_characters() {
    let mut store = signup_store();
    let too_long = "x".repeat(MAX_TEXT_LEN + 1);
    for field in [keys::FIRST_NAME, keys::EMAIL, keys::PASSWORD] {
        let err = store
            .set(field, AnswerValue::Text(too_long.clone()))
            .unwrap_err();
        assert!(matches!(err, AnswerError::ValueTooLong { .. }));
    }
    store
        .set(keys::FIRST_NAME, AnswerValue::Text("x".repeat(MAX_TEXT_LEN)))
        .unwrap();
}

#[tokio::test]
async fn titles_template_earlier_answers_into_later_steps() {
    let service = Arc::new(ScriptedService::new());
    let tokens = Arc::new(MemoryTokenStore::new());
    let mut wizard = wizard(service, tokens);

    pick_role(&mut wizard, Role::Musician);
    wizard.submit().await.unwrap();

    let view = wizard.view().unwrap();
    assert_eq!(view.subtitle, "Setting up your Musician account");

    fill_names(&mut wizard, "Ana", "Reyes");
    wizard.submit().await.unwrap();

    let view = wizard.view().unwrap();
    assert_eq!(view.title, "Nice to meet you, Ana!");
    assert_eq!(view.index, 2);
    assert_eq!(view.total, 5);
}

#[tokio::test]
async fn blocked_steps_keep_their_answers_for_the_retry() {
    let service = Arc::new(ScriptedService::new());
    let tokens = Arc::new(MemoryTokenStore::new());
    let mut wizard = wizard(service, tokens);

    pick_role(&mut wizard, Role::Musician);
    wizard.submit().await.unwrap();
    fill_names(&mut wizard, "Ana", "Reyes");
    wizard.submit().await.unwrap();
    fill_email(&mut wizard, "a@b.com", "a@c.com");

    let outcome = wizard.submit().await.unwrap();
    assert!(matches!(outcome, AdvanceOutcome::Blocked(_)));
    let view = wizard.view().unwrap();
    assert_eq!(view.fields[0].value.as_deref(), Some("a@b.com"));
    assert_eq!(view.fields[1].value.as_deref(), Some("a@c.com"));
    assert!(view.error.is_some());

    wizard.dismiss_error();
    let view = wizard.view().unwrap();
    assert!(view.error.is_none());
    assert_eq!(view.fields[0].value.as_deref(), Some("a@b.com"));
}
