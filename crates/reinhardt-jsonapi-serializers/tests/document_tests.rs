//! End-to-end document serialization tests
//!
//! Exercises full `serialize` calls: primary data, relationship linkages,
//! included resources and the structural rules of the top-level document.

use reinhardt_jsonapi_core::{JsonApiError, JsonApiErrorKind, relations};
use reinhardt_jsonapi_serializers::{
	DocumentInput, RelationshipSchema, ResourceSchema, ResourceSerializer, SerializerConfig,
	SerializerRef, SerializerRegistry,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

// =============================================================================
// Fixtures
// =============================================================================

fn isolated_config() -> SerializerConfig {
	SerializerConfig::new().with_registry(SerializerRegistry::new())
}

#[fixture]
fn address_serializer() -> ResourceSerializer {
	ResourceSerializer::with_config("address", ResourceSchema::new(), isolated_config())
}

#[fixture]
fn person_serializer(address_serializer: ResourceSerializer) -> ResourceSerializer {
	ResourceSerializer::with_config(
		"person",
		ResourceSchema::new().attributes(["name"]).relationship(
			"address",
			RelationshipSchema::new(address_serializer, relations::has_many("personId")),
		),
		isolated_config(),
	)
}

fn render(serializer: &ResourceSerializer, input: &DocumentInput) -> Value {
	serializer.serialize(input).unwrap().to_value().unwrap()
}

// =============================================================================
// Primary data and relationships
// =============================================================================

/// Test a person with one matching address supplied as a single record
///
/// **Category**: Happy Path
/// **Verifies**: to-one linkage and included resource for a single candidate
#[rstest]
fn test_person_with_single_address(person_serializer: ResourceSerializer) {
	// Arrange
	let input = DocumentInput::new()
		.with_data(json!({"id": 1, "name": "Jo"}))
		.with_included("address", json!({"id": 9, "personId": 1}));

	// Act
	let document = render(&person_serializer, &input);

	// Assert
	assert_eq!(
		document,
		json!({
			"data": {
				"type": "person",
				"id": "1",
				"attributes": {"name": "Jo"},
				"relationships": {"address": {"data": {"type": "address", "id": "9"}}}
			},
			"included": [{"type": "address", "id": "9"}]
		})
	);
}

/// Test a person with addresses supplied as a collection
///
/// **Category**: Happy Path
/// **Verifies**: to-many linkage keeps only the person's addresses
#[rstest]
fn test_person_with_address_collection(person_serializer: ResourceSerializer) {
	let input = DocumentInput::new()
		.with_data(json!({"id": 1, "name": "Jo"}))
		.with_included(
			"address",
			json!([{"id": 9, "personId": 1}, {"id": 10, "personId": 2}]),
		);

	let document = render(&person_serializer, &input);

	assert_eq!(
		document["data"]["relationships"]["address"],
		json!({"data": [{"type": "address", "id": "9"}]})
	);
	assert_eq!(
		document["included"],
		json!([{"type": "address", "id": "9"}, {"type": "address", "id": "10"}])
	);
}

/// Test deduplication of repeated related records
///
/// **Category**: Edge Case
/// **Verifies**: linkage and included both hold each `(type, id)` once
#[rstest]
fn test_has_many_deduplicates_by_identity() {
	// Arrange
	let address = ResourceSerializer::with_config(
		"address",
		ResourceSchema::new(),
		isolated_config().with_ref_field("uuid"),
	);
	let person = ResourceSerializer::with_config(
		"person",
		ResourceSchema::new().relationship(
			"address",
			RelationshipSchema::new(address, relations::has_many("personId")),
		),
		isolated_config(),
	);
	let input = DocumentInput::new().with_data(json!({"id": 1})).with_included(
		"address",
		json!([
			{"personId": 1, "uuid": 2},
			{"personId": 1, "uuid": 3},
			{"personId": 1, "uuid": 2}
		]),
	);

	// Act
	let document = render(&person, &input);

	// Assert
	assert_eq!(
		document["data"]["relationships"]["address"]["data"],
		json!([{"type": "address", "id": "2"}, {"type": "address", "id": "3"}])
	);
	assert_eq!(
		document["included"],
		json!([{"type": "address", "uuid": "2"}, {"type": "address", "uuid": "3"}])
	);
}

/// Test a collection of people sharing related records
///
/// **Category**: Happy Path
/// **Verifies**: each person gets its own linkage; included stays deduplicated
#[rstest]
fn test_collection_of_people(person_serializer: ResourceSerializer) {
	let input = DocumentInput::new()
		.with_data(json!([
			{"id": 1, "name": "Jo"},
			{"id": 2, "name": "Sam"},
			{"id": 3, "name": "Ari"}
		]))
		.with_included(
			"address",
			json!([
				{"id": 9, "personId": [1, 2]},
				{"id": 10, "personId": 2}
			]),
		);

	let document = render(&person_serializer, &input);
	let data = document["data"].as_array().unwrap();

	assert_eq!(data.len(), 3);
	assert_eq!(
		data[0]["relationships"]["address"]["data"],
		json!([{"type": "address", "id": "9"}])
	);
	assert_eq!(
		data[1]["relationships"]["address"]["data"],
		json!([{"type": "address", "id": "9"}, {"type": "address", "id": "10"}])
	);
	assert!(data[2].get("relationships").is_none());
	assert_eq!(document["included"].as_array().unwrap().len(), 2);
}

/// Test belongs-to relationships across a collection of articles
///
/// **Category**: Happy Path
/// **Verifies**: each article links to the single author it references
#[rstest]
fn test_articles_belong_to_authors() {
	// Arrange
	let author = ResourceSerializer::with_config(
		"person",
		ResourceSchema::new().attributes(["name"]),
		isolated_config(),
	);
	let article = ResourceSerializer::with_config(
		"article",
		ResourceSchema::new().attributes(["title"]).relationship(
			"author",
			RelationshipSchema::new(author, relations::belongs_to("authorId")),
		),
		isolated_config(),
	);
	let input = DocumentInput::new()
		.with_data(json!([
			{"id": "a1", "title": "First", "authorId": 3},
			{"id": "a2", "title": "Second", "authorId": 4},
			{"id": "a3", "title": "Orphan", "authorId": 99}
		]))
		.with_included(
			"author",
			json!([{"id": 3, "name": "Kim"}, {"id": 4, "name": "Lee"}]),
		);

	// Act
	let document = render(&article, &input);

	// Assert
	assert_eq!(
		document["data"][0]["relationships"]["author"],
		json!({"data": {"type": "person", "id": "3"}})
	);
	assert_eq!(
		document["data"][1]["relationships"]["author"],
		json!({"data": {"type": "person", "id": "4"}})
	);
	assert!(document["data"][2].get("relationships").is_none());
	assert_eq!(
		document["included"],
		json!([
			{"type": "person", "id": "3", "attributes": {"name": "Kim"}},
			{"type": "person", "id": "4", "attributes": {"name": "Lee"}}
		])
	);
}

/// Test many-to-many linkage over a tag collection
///
/// **Category**: Happy Path
/// **Verifies**: every supplied tag is linked, without duplicates
#[rstest]
fn test_post_belongs_to_many_tags() {
	let tag = ResourceSerializer::with_config(
		"tag",
		ResourceSchema::new().attributes(["label"]),
		isolated_config(),
	);
	let post = ResourceSerializer::with_config(
		"post",
		ResourceSchema::new().relationship(
			"tags",
			RelationshipSchema::new(tag, relations::belongs_to_many("postIds")),
		),
		isolated_config(),
	);
	let input = DocumentInput::new().with_data(json!({"id": 5})).with_included(
		"tags",
		json!([
			{"id": 1, "label": "rust", "postIds": [5]},
			{"id": 2, "label": "web", "postIds": [5, 6]},
			{"id": 1, "label": "rust", "postIds": [5]}
		]),
	);

	let document = render(&post, &input);

	assert_eq!(
		document["data"]["relationships"]["tags"]["data"],
		json!([{"type": "tag", "id": "1"}, {"type": "tag", "id": "2"}])
	);
	assert_eq!(document["included"].as_array().unwrap().len(), 2);
}

/// Test two relationships reaching the same related record
///
/// **Category**: Edge Case
/// **Verifies**: included is deduplicated across relationships
#[rstest]
fn test_included_deduplicated_across_relationships() {
	let person = std::sync::Arc::new(ResourceSerializer::with_config(
		"person",
		ResourceSchema::new(),
		isolated_config(),
	));
	let issue = ResourceSerializer::with_config(
		"issue",
		ResourceSchema::new()
			.relationship(
				"assignee",
				RelationshipSchema::new(person.clone(), relations::belongs_to("assigneeId")),
			)
			.relationship(
				"reporter",
				RelationshipSchema::new(person, relations::belongs_to("reporterId")),
			),
		isolated_config(),
	);
	let input = DocumentInput::new()
		.with_data(json!({"id": 1, "assigneeId": 7, "reporterId": 7}))
		.with_included("assignee", json!([{"id": 7}]))
		.with_included("reporter", json!([{"id": 7}]));

	let document = render(&issue, &input);

	assert_eq!(
		document["data"]["relationships"],
		json!({
			"assignee": {"data": {"type": "person", "id": "7"}},
			"reporter": {"data": {"type": "person", "id": "7"}}
		})
	);
	assert_eq!(document["included"], json!([{"type": "person", "id": "7"}]));
}

/// Test an inline related serializer definition
///
/// **Category**: Happy Path
/// **Verifies**: inline definitions are built with their own configuration
#[rstest]
fn test_inline_related_serializer() {
	let company = SerializerRef::inline_with_config(
		"company",
		ResourceSchema::new().attributes(["name"]),
		isolated_config().with_ref_field("slug"),
	);
	let person = ResourceSerializer::with_config(
		"person",
		ResourceSchema::new().relationship(
			"employer",
			RelationshipSchema::new(company, relations::belongs_to("employer")),
		),
		isolated_config(),
	);
	let input = DocumentInput::new()
		.with_data(json!({"id": 1, "employer": "acme"}))
		.with_included("employer", json!({"slug": "acme", "name": "Acme"}));

	let document = render(&person, &input);

	assert_eq!(
		document["data"]["relationships"]["employer"],
		json!({"data": {"type": "company", "id": "acme"}})
	);
	assert_eq!(
		document["included"],
		json!([{"type": "company", "slug": "acme", "attributes": {"name": "Acme"}}])
	);
}

// =============================================================================
// Links
// =============================================================================

/// Test resource-level and top-level links
///
/// **Category**: Happy Path
/// **Verifies**: only recognised link names are emitted at each level
#[rstest]
fn test_links_are_filtered_per_level() {
	let person = ResourceSerializer::with_config(
		"person",
		ResourceSchema::new()
			.link("self", |record| json!(format!("/people/{}", record["id"])))
			.link("related", |record| {
				json!({"href": format!("/people/{}/friends", record["id"]), "meta": {"count": 2}})
			})
			.link("next", |_| json!("/never")),
		isolated_config(),
	);
	let input = DocumentInput::new()
		.with_data(json!({"id": 4}))
		.with_link("self", json!("/people/4"))
		.with_link("first", json!("/people?page=1"))
		.with_link("bogus", json!("/dropped"));

	let document = render(&person, &input);

	assert_eq!(
		document["data"]["links"],
		json!({
			"self": "/people/4",
			"related": {"href": "/people/4/friends", "meta": {"count": 2}}
		})
	);
	assert_eq!(
		document["links"],
		json!({"self": "/people/4", "first": "/people?page=1"})
	);
}

// =============================================================================
// Structural rules
// =============================================================================

/// Test that an empty input is rejected
///
/// **Category**: Error Path
/// **Verifies**: a document needs one of data, errors, meta
#[rstest]
fn test_empty_input_is_rejected(person_serializer: ResourceSerializer) {
	let err = person_serializer.serialize(&DocumentInput::new()).unwrap_err();

	assert_eq!(err, JsonApiError::TopLevelDocument);
	assert_eq!(err.kind(), JsonApiErrorKind::TopLevelDocument);
}

/// Test documents carrying only meta or only errors
///
/// **Category**: Happy Path
/// **Verifies**: meta and errors are passed through verbatim
#[rstest]
#[case(DocumentInput::new().with_meta(json!({"total": 0})), json!({"meta": {"total": 0}}))]
#[case(
	DocumentInput::new().with_errors(json!([{"status": "422", "title": "Invalid"}])),
	json!({"errors": [{"status": "422", "title": "Invalid"}]})
)]
fn test_meta_or_errors_only(
	person_serializer: ResourceSerializer,
	#[case] input: DocumentInput,
	#[case] expected: Value,
) {
	assert_eq!(render(&person_serializer, &input), expected);
}

/// Test that blank meta does not satisfy the document rule
///
/// **Category**: Edge Case
/// **Verifies**: an empty meta object counts as absent
#[rstest]
fn test_blank_meta_is_rejected(person_serializer: ResourceSerializer) {
	let input = DocumentInput::new().with_meta(json!({}));

	assert!(
		person_serializer
			.serialize(&input)
			.unwrap_err()
			.is_top_level_document_error()
	);
}

/// Test that included is dropped without primary data
///
/// **Category**: Edge Case
/// **Verifies**: empty or null data never carries included resources
#[rstest]
#[case(json!([]), json!({"data": []}))]
#[case(json!(null), json!({"data": null}))]
fn test_included_requires_non_empty_data(
	person_serializer: ResourceSerializer,
	#[case] data: Value,
	#[case] expected: Value,
) {
	let input = DocumentInput::new()
		.with_data(data)
		.with_included("address", json!([{"id": 9, "personId": 1}]));

	assert_eq!(render(&person_serializer, &input), expected);
}

/// Test that included is dropped when only meta is present
///
/// **Category**: Edge Case
/// **Verifies**: absent data never carries included resources
#[rstest]
fn test_included_dropped_without_data(person_serializer: ResourceSerializer) {
	let input = DocumentInput::new()
		.with_meta(json!({"note": "no data"}))
		.with_included("address", json!([{"id": 9, "personId": 1}]));

	assert_eq!(
		render(&person_serializer, &input),
		json!({"meta": {"note": "no data"}})
	);
}

/// Test a record without the configured ref field
///
/// **Category**: Error Path
/// **Verifies**: the whole call fails with a data reference error
#[rstest]
fn test_missing_ref_field_fails(person_serializer: ResourceSerializer) {
	let input = DocumentInput::new().with_data(json!({"name": "Jo"}));

	let err = person_serializer.serialize(&input).unwrap_err();

	assert!(err.is_data_reference_error());
	assert_eq!(err.to_string(), "id property must be defined within data");
}

/// Test an included record without the related ref field
///
/// **Category**: Error Path
/// **Verifies**: included records are validated by their own serializer
#[rstest]
fn test_included_record_without_ref_fails(person_serializer: ResourceSerializer) {
	let input = DocumentInput::new()
		.with_data(json!({"id": 1}))
		.with_included("address", json!([{"personId": 1}]));

	assert!(
		person_serializer
			.serialize(&input)
			.unwrap_err()
			.is_data_reference_error()
	);
}

/// Test that serializing the same input twice yields the same document
///
/// **Category**: Property
/// **Verifies**: no state leaks across calls
#[rstest]
fn test_serialize_is_idempotent(person_serializer: ResourceSerializer) {
	let input = DocumentInput::new()
		.with_data(json!([{"id": 1, "name": "Jo"}, {"id": 2}]))
		.with_included("address", json!([{"id": 9, "personId": [1, 2]}]))
		.with_meta(json!({"page": 1}));

	let first = person_serializer.serialize(&input).unwrap();
	let second = person_serializer.serialize(&input).unwrap();

	assert_eq!(first, second);
	assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

/// Test serializing a deserialized input document
///
/// **Category**: Happy Path
/// **Verifies**: JSON input distinguishes absent data from null data
#[rstest]
fn test_deserialized_input(person_serializer: ResourceSerializer) {
	let input: DocumentInput = serde_json::from_str(
		r#"{"data": null, "included": {"address": [{"id": 9, "personId": 1}]}}"#,
	)
	.unwrap();

	assert_eq!(render(&person_serializer, &input), json!({"data": null}));
}

/// Test collections whose members are not all records
///
/// **Category**: Edge Case
/// **Verifies**: null members stay null and nested collections keep their shape
#[rstest]
#[case(
	json!([{"id": 1}, null]),
	json!([{"type": "person", "id": "1"}, null])
)]
#[case(
	json!([[{"id": 1}], [{"id": 2}, {}]]),
	json!([[{"type": "person", "id": "1"}], [{"type": "person", "id": "2"}, null]])
)]
fn test_collection_members_are_serialized_recursively(
	person_serializer: ResourceSerializer,
	#[case] data: Value,
	#[case] expected: Value,
) {
	let document = render(&person_serializer, &DocumentInput::new().with_data(data));

	assert_eq!(document["data"], expected);
}

/// Test blank scalar primary data
///
/// **Category**: Edge Case
/// **Verifies**: numbers, booleans and empty strings render as null data
#[rstest]
#[case(json!(5))]
#[case(json!(true))]
#[case(json!(""))]
fn test_blank_scalar_data_is_null(person_serializer: ResourceSerializer, #[case] data: Value) {
	let document = render(&person_serializer, &DocumentInput::new().with_data(data));

	assert_eq!(document, json!({"data": null}));
}

/// Test a nested collection with related records
///
/// **Category**: Edge Case
/// **Verifies**: nested members resolve relationships and keep included
#[rstest]
fn test_nested_collection_keeps_relationships(person_serializer: ResourceSerializer) {
	let input = DocumentInput::new()
		.with_data(json!([[{"id": 1, "name": "Jo"}], null]))
		.with_included("address", json!([{"id": 9, "personId": 1}]));

	let document = render(&person_serializer, &input);

	assert_eq!(
		document["data"][0][0]["relationships"]["address"],
		json!({"data": [{"type": "address", "id": "9"}]})
	);
	assert_eq!(document["data"][1], json!(null));
	assert_eq!(document["included"], json!([{"type": "address", "id": "9"}]));
}
