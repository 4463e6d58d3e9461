pub const TABLE_RESTAURANT: &str = "restaurant";
pub const TABLE_REVIEW: &str = "review";
pub const TABLE_ID_COUNTER: &str = "id_counter";

/// Schema definitions applied when a store handle is built.
///
/// Tables stay schemaless; the index keeps per-restaurant review lookups and
/// the grouped aggregate off a full scan.
pub const DEFINE_SCHEMA: &str = "
DEFINE TABLE IF NOT EXISTS restaurant SCHEMALESS;
DEFINE TABLE IF NOT EXISTS review SCHEMALESS;
DEFINE TABLE IF NOT EXISTS id_counter SCHEMALESS;
DEFINE INDEX IF NOT EXISTS review_restaurant ON TABLE review FIELDS restaurant;
";

/// Projection used whenever restaurant rows are read back.
pub const RESTAURANT_FIELDS: &str = "record::id(id) AS id, name, street_address, description";

/// Projection used whenever review rows are read back.
pub const REVIEW_FIELDS: &str =
    "record::id(id) AS id, restaurant, user_name, rating, review_text, review_date";
