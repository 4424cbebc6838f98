//! Point table and report categories.
//!
//! Both scoring and the per-category breakdown read from these tables.

/// Minimum score, in percent, for the exam to pass.
pub const PASS_THRESHOLD: f64 = 80.0;

/// Points for tests absent from [`POINT_TABLE`].
pub const DEFAULT_POINTS: u32 = 5;

/// Maximum points per test name.
pub const POINT_TABLE: &[(&str, u32)] = &[
    ("test_unique_division_names", 5),
    ("test_unique_department_names", 5),
    ("test_unique_class_names", 5),
    ("test_products_by_department", 10),
    ("test_departments_by_division", 15),
    ("test_null_values", 10),
    ("test_rating_distribution", 10),
    ("test_age_stats", 10),
    ("test_class_scores", 15),
    ("test_age_histogram_classes", 15),
    ("test_best_rated_terms", 20),
    ("test_worst_rated_terms", 20),
    ("test_best_reviews", 25),
    ("test_worst_reviews", 25),
    ("test_index_exists", 10),
    ("test_index_mapping", 10),
    ("test_data_loaded", 15),
    ("test_data_types", 10),
    ("test_data_constraints", 10),
];

/// Report categories, in display order.
pub const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "ETL & Setup",
        &[
            "test_index_exists",
            "test_index_mapping",
            "test_data_loaded",
            "test_data_types",
            "test_data_constraints",
        ],
    ),
    (
        "Basic analysis",
        &[
            "test_unique_division_names",
            "test_unique_department_names",
            "test_unique_class_names",
            "test_products_by_department",
        ],
    ),
    (
        "Advanced analysis",
        &[
            "test_departments_by_division",
            "test_null_values",
            "test_rating_distribution",
            "test_age_stats",
        ],
    ),
    (
        "Complex queries",
        &[
            "test_class_scores",
            "test_age_histogram_classes",
            "test_best_rated_terms",
            "test_worst_rated_terms",
        ],
    ),
    ("Business Intelligence", &["test_best_reviews", "test_worst_reviews"]),
];

/// Maximum points for a test.
pub fn max_points(test_name: &str) -> u32 {
    POINT_TABLE
        .iter()
        .find(|(name, _)| *name == test_name)
        .map_or(DEFAULT_POINTS, |(_, points)| *points)
}
