use model_rules::translate::NAMESPACE;
use model_rules::{Catalog, Context, ExistsRule, Model, Rule, RuleKind, SqliteAdapter, UniqueRule};

struct User;
impl Model for User {
    const IDENTIFIER: &'static str = "app::models::User";
    const TABLE: &'static str = "users";
    const DELETED_AT: Option<&'static str> = Some("deleted_at");
}

fn setup() -> SqliteAdapter {
    let adapter = SqliteAdapter::open(&Default::default()).unwrap();
    adapter
        .execute_batch(
            "
        create table users (
            id integer primary key autoincrement,
            name text not null,
            deleted_at text null
        );
        insert into users (id, name) values (2, 'Testname');
        ",
        )
        .unwrap();
    adapter
}

fn catalog() -> Catalog {
    let mut catalog = Catalog::english();
    catalog.add_lines(
        [
            ("validation.exists_model", "A :model with the :attribute \":value\" does not exist."),
            ("validation.unique_model", "A :model with the :attribute \":value\" already exists."),
        ],
        Some(NAMESPACE),
    );
    catalog.add_lines(
        [
            ("validation.custom_exists", "A :model with the :attribute \":value\" does not exist. / Test"),
            ("validation.custom_unique", "A :model with the :attribute \":value\" already exists. / Test"),
        ],
        None,
    );
    catalog
}

fn failure(rule: &dyn Rule, value: i64) -> Option<String> {
    let adapter = setup();
    let catalog = catalog();
    let ctx = Context::new(&adapter, &catalog);
    rule.evaluate(&ctx, "id", &value.into()).unwrap().message().map(str::to_string)
}

#[test]
fn default_message_is_translated_with_parameters() {
    assert_eq!(
        failure(&ExistsRule::of::<User>(), 1).as_deref(),
        Some("A user with the id \"1\" does not exist.")
    );
    assert_eq!(
        failure(&UniqueRule::of::<User>(), 2).as_deref(),
        Some("A user with the id \"2\" already exists.")
    );
}

#[test]
fn custom_message_is_returned_verbatim() {
    let rule = ExistsRule::of::<User>().with_message("Test :attribute");
    assert_eq!(failure(&rule, 1).as_deref(), Some("Test :attribute"));
    let rule = UniqueRule::of::<User>().with_message("Test :attribute");
    assert_eq!(failure(&rule, 2).as_deref(), Some("Test :attribute"));
}

#[test]
fn custom_translation_is_used_when_set() {
    let rule = ExistsRule::of::<User>().with_custom_translation("validation.custom_exists");
    assert_eq!(
        failure(&rule, 1).as_deref(),
        Some("A user with the id \"1\" does not exist. / Test")
    );
    let rule = UniqueRule::of::<User>().with_custom_translation("validation.custom_unique");
    assert_eq!(
        failure(&rule, 2).as_deref(),
        Some("A user with the id \"2\" already exists. / Test")
    );
}

#[test]
fn custom_message_wins_over_custom_translation_in_any_order() {
    let rule = UniqueRule::of::<User>()
        .with_message("Literal")
        .with_custom_translation("validation.custom_unique");
    assert_eq!(failure(&rule, 2).as_deref(), Some("Literal"));
    let mut rule = ExistsRule::of::<User>().with_custom_translation("validation.custom_exists");
    rule.set_message("Literal", false);
    assert_eq!(failure(&rule, 1).as_deref(), Some("Literal"));
}

#[test]
fn unknown_custom_translation_falls_back_to_its_key() {
    let rule = ExistsRule::of::<User>().with_custom_translation("validation.missing");
    assert_eq!(failure(&rule, 1).as_deref(), Some("validation.missing"));
}

#[test]
fn passing_rules_produce_no_message() {
    assert_eq!(failure(&ExistsRule::of::<User>().with_message("never"), 2), None);
    assert_eq!(failure(&UniqueRule::of::<User>().with_message("never"), 1), None);
}

#[test]
fn rules_report_their_kind() {
    assert_eq!(ExistsRule::of::<User>().kind(), RuleKind::Exists);
    assert_eq!(UniqueRule::of::<User>().kind().name(), "unique");
    assert_eq!(RuleKind::Exists.default_key(), "model-rules::validation.exists_model");
}
