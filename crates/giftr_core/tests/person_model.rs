use giftr_core::{sorted_by_name, Idea, Person, PersonValidationError};
use uuid::Uuid;

#[test]
fn person_new_sets_defaults() {
    let person = Person::new("Ana", "1990-05-01");

    assert!(!person.id.is_nil());
    assert_eq!(person.name, "Ana");
    assert_eq!(person.birthday, "1990-05-01");
    assert!(person.ideas.is_empty());
    person.validate().expect("fresh person should be valid");
}

#[test]
fn idea_new_sets_defaults_and_with_image_attaches_reference() {
    let idea = Idea::new("Book");
    assert!(!idea.id.is_nil());
    assert_eq!(idea.text, "Book");
    assert_eq!(idea.image, None);

    let with_photo = Idea::new("Camera strap").with_image("file:///photos/idea_1.jpg");
    assert_eq!(with_photo.image.as_deref(), Some("file:///photos/idea_1.jpg"));
}

#[test]
fn with_id_rejects_nil_uuid() {
    let person_err = Person::with_id(Uuid::nil(), "Ana", "1990-05-01").unwrap_err();
    assert_eq!(person_err, PersonValidationError::NilId);

    let idea_err = Idea::with_id(Uuid::nil(), "Book").unwrap_err();
    assert_eq!(idea_err, PersonValidationError::NilIdeaId);
}

#[test]
fn validate_rejects_blank_fields() {
    let mut person = Person::new("  ", "1990-05-01");
    assert_eq!(person.validate(), Err(PersonValidationError::EmptyName));

    person.name = "Ana".to_string();
    person.birthday = "   ".to_string();
    assert_eq!(person.validate(), Err(PersonValidationError::EmptyBirthday));

    person.birthday = "1990-05-01".to_string();
    let blank_idea = Idea::new("   ");
    let idea_id = blank_idea.id;
    person.add_idea(blank_idea);
    assert_eq!(
        person.validate(),
        Err(PersonValidationError::EmptyIdeaText { idea_id })
    );
}

#[test]
fn validate_rejects_duplicate_idea_id_within_one_person() {
    let shared_id = Uuid::parse_str("00000000-0000-4000-8000-000000000001").unwrap();
    let mut person = Person::new("Ana", "1990-05-01");
    person.add_idea(Idea::with_id(shared_id, "Book").unwrap());
    person.add_idea(Idea::with_id(shared_id, "Socks").unwrap());

    assert_eq!(
        person.validate(),
        Err(PersonValidationError::DuplicateIdeaId { idea_id: shared_id })
    );
}

#[test]
fn idea_add_remove_and_find_helpers() {
    let mut person = Person::new("Ana", "1990-05-01");
    let idea = Idea::new("Book");
    let idea_id = idea.id;

    person.add_idea(idea);
    assert_eq!(person.find_idea(idea_id).map(|i| i.text.as_str()), Some("Book"));

    assert!(person.remove_idea(idea_id));
    assert!(person.find_idea(idea_id).is_none());
    assert!(!person.remove_idea(idea_id), "second removal is a no-op");
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let person_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let idea_id = Uuid::parse_str("00000000-0000-4000-8000-000000000001").unwrap();

    let mut person = Person::with_id(person_id, "Ana", "1990-05-01").unwrap();
    person.add_idea(Idea::with_id(idea_id, "Book").unwrap());
    person.add_idea(
        Idea::new("Camera strap").with_image("file:///photos/idea_2.jpg"),
    );

    let json = serde_json::to_value(&person).unwrap();
    assert_eq!(json["id"], person_id.to_string());
    assert_eq!(json["name"], "Ana");
    assert_eq!(json["birthday"], "1990-05-01");
    assert_eq!(json["ideas"][0]["id"], idea_id.to_string());
    assert_eq!(json["ideas"][0]["text"], "Book");
    assert!(
        json["ideas"][0].get("image").is_none(),
        "absent image must be omitted, not null"
    );
    assert_eq!(json["ideas"][1]["image"], "file:///photos/idea_2.jpg");

    let decoded: Person = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, person);
}

#[test]
fn deserialization_defaults_missing_ideas_to_empty() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "name": "Ana",
        "birthday": "1990-05-01"
    });

    let person: Person = serde_json::from_value(value).unwrap();
    assert!(person.ideas.is_empty());
}

#[test]
fn sorted_by_name_is_case_insensitive_and_leaves_input_untouched() {
    let people = vec![
        Person::new("carla", "1992-02-02"),
        Person::new("Ana", "1990-05-01"),
        Person::new("Bob", "1985-11-20"),
    ];

    let sorted = sorted_by_name(&people);
    let names: Vec<&str> = sorted.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Bob", "carla"]);
    assert_eq!(people[0].name, "carla", "input order must be preserved");
}
