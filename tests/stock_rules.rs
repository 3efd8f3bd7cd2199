use std::collections::HashSet;

use axum_warehouse_api::models::{ArticleStock, RequirementDetail};
use axum_warehouse_api::services::product_service::compute_availability;
use axum_warehouse_api::store::partition_by_existence;

fn requirement(stock: i64, quantity: i64) -> RequirementDetail {
    RequirementDetail {
        quantity,
        article: ArticleStock {
            id: 1,
            name: "article".into(),
            stock,
        },
    }
}

#[test]
fn availability_is_the_minimum_over_requirements() {
    // min(5/2, 9/3) = min(2, 3) = 2
    let requirements = vec![requirement(5, 2), requirement(9, 3)];
    assert_eq!(compute_availability(&requirements), Some(2));
}

#[test]
fn availability_is_zero_when_any_article_is_short() {
    let requirements = vec![requirement(10, 1), requirement(1, 2)];
    assert_eq!(compute_availability(&requirements), Some(0));
}

#[test]
fn availability_over_no_requirements_is_undefined() {
    assert_eq!(compute_availability(&[]), None);
}

#[test]
fn partition_splits_present_and_absent_preserving_order() {
    let existing: HashSet<i64> = [2, 4, 6].into_iter().collect();
    let (present, absent) = partition_by_existence([1, 2, 3, 4, 5], &existing);
    assert_eq!(present, vec![2, 4]);
    assert_eq!(absent, vec![1, 3, 5]);
}

#[test]
fn partition_of_empty_candidates_is_empty() {
    let existing: HashSet<String> = HashSet::new();
    let (present, absent) = partition_by_existence(Vec::<String>::new(), &existing);
    assert!(present.is_empty());
    assert!(absent.is_empty());
}

#[test]
fn partition_works_on_names() {
    let existing: HashSet<String> = ["kit".to_string()].into_iter().collect();
    let (present, absent) = partition_by_existence(
        ["kit".to_string(), "shelf".to_string()],
        &existing,
    );
    assert_eq!(present, vec!["kit".to_string()]);
    assert_eq!(absent, vec!["shelf".to_string()]);
}
