//! Canonical feature columns and the source names accepted for each.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use crate::utils::column_names;

/// A canonical feature and the column names that may hold it, in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasGroup {
    pub canonical: String,
    pub aliases: Vec<String>,
}

impl AliasGroup {
    pub fn new<I, S>(canonical: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            canonical: canonical.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }

    /// First alias that names a column in `df`.
    pub fn resolve<'a>(&'a self, df: &DataFrame) -> Option<&'a str> {
        let columns = column_names(df);
        self.aliases
            .iter()
            .find(|alias| columns.contains(alias))
            .map(String::as_str)
    }
}

/// The seven health measurements scaled by default (Pima Indians layout plus
/// the alternate names used by other exports of the same data).
pub fn default_feature_groups() -> Vec<AliasGroup> {
    vec![
        AliasGroup::new("Pregnancies", ["Pregnancies"]),
        AliasGroup::new("Glucose", ["Glucose", "PlasmaGlucose"]),
        AliasGroup::new("BloodPressure", ["BloodPressure", "DiastolicBloodPressure"]),
        AliasGroup::new("SkinThickness", ["SkinThickness", "TricepsThickness"]),
        AliasGroup::new("Insulin", ["Insulin", "SerumInsulin"]),
        AliasGroup::new("BMI", ["BMI"]),
        AliasGroup::new(
            "DiabetesPedigreeFunction",
            ["DiabetesPedigreeFunction", "DiabetesPedigree"],
        ),
    ]
}

/// Source columns to scale, one per group that matched, in group order.
pub fn resolve_feature_columns(df: &DataFrame, groups: &[AliasGroup]) -> Vec<String> {
    groups
        .iter()
        .filter_map(|group| group.resolve(df))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_groups() {
        let groups = default_feature_groups();
        let names: Vec<&str> = groups.iter().map(|g| g.canonical.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Pregnancies",
                "Glucose",
                "BloodPressure",
                "SkinThickness",
                "Insulin",
                "BMI",
                "DiabetesPedigreeFunction",
            ]
        );
        assert!(groups.iter().all(|g| g.aliases[0] == g.canonical));
    }

    #[test]
    fn test_alias_used_when_canonical_absent() {
        let df = df![
            "PlasmaGlucose" => [148, 85],
            "Age" => [50, 31],
        ]
        .unwrap();

        let cols = resolve_feature_columns(&df, &default_feature_groups());
        assert_eq!(cols, vec!["PlasmaGlucose".to_string()]);
    }

    #[test]
    fn test_first_alias_wins_when_both_present() {
        let df = df![
            "PlasmaGlucose" => [148, 85],
            "Glucose" => [150, 90],
        ]
        .unwrap();

        let cols = resolve_feature_columns(&df, &default_feature_groups());
        assert_eq!(cols, vec!["Glucose".to_string()]);
    }

    #[test]
    fn test_second_alias_resolves_its_group() {
        let df = df!["DiastolicBloodPressure" => [72, 66]].unwrap();

        let groups = default_feature_groups();
        assert_eq!(groups[2].resolve(&df), Some("DiastolicBloodPressure"));
        assert_eq!(
            resolve_feature_columns(&df, &groups),
            vec!["DiastolicBloodPressure".to_string()]
        );
    }

    #[test]
    fn test_columns_follow_group_order() {
        let df = df![
            "BMI" => [33.6],
            "SerumInsulin" => [0],
            "Pregnancies" => [6],
            "DiabetesPedigree" => [0.627],
        ]
        .unwrap();

        let cols = resolve_feature_columns(&df, &default_feature_groups());
        assert_eq!(
            cols,
            ["Pregnancies", "SerumInsulin", "BMI", "DiabetesPedigree"]
                .map(String::from)
                .to_vec()
        );
    }

    #[test]
    fn test_no_matches() {
        let df = df!["Age" => [50], "Outcome" => [1]].unwrap();
        assert!(resolve_feature_columns(&df, &default_feature_groups()).is_empty());
    }
}
