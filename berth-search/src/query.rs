use std::sync::Arc;
use berth_catalog::{Train, TrainRepository};
use berth_core::{SearchCriteria, ValidationError};
use crate::SearchError;

/// Trains from `candidates` that run the criteria's route and offer the
/// requested class. Criteria are validated first; every problem is reported.
pub fn query(candidates: &[Train], criteria: &SearchCriteria) -> Result<Vec<Train>, SearchError> {
    let (origin, destination) = validated_route(criteria)?;

    Ok(candidates
        .iter()
        .filter(|t| t.departure_station.code == origin && t.arrival_station.code == destination)
        .filter(|t| t.classes.iter().any(|c| criteria.class_filter.admits(c.class_type)))
        .cloned()
        .collect())
}

fn validated_route(criteria: &SearchCriteria) -> Result<(&str, &str), SearchError> {
    criteria.validate().map_err(SearchError::InvalidCriteria)?;
    match (&criteria.origin, &criteria.destination) {
        (Some(origin), Some(destination)) => Ok((origin.code.as_str(), destination.code.as_str())),
        // validate() already rejected this
        _ => Err(SearchError::InvalidCriteria(vec![ValidationError::MissingOriginStation])),
    }
}

/// Runs `query` against a catalog repository.
pub struct TrainQuery {
    repository: Arc<dyn TrainRepository>,
}

impl TrainQuery {
    pub fn new(repository: Arc<dyn TrainRepository>) -> Self {
        Self { repository }
    }

    pub async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Train>, SearchError> {
        criteria.validate().map_err(SearchError::InvalidCriteria)?;

        let (origin, destination, date) = match (&criteria.origin, &criteria.destination, criteria.travel_date) {
            (Some(o), Some(d), Some(date)) => (o, d, date),
            _ => return Err(SearchError::InvalidCriteria(vec![ValidationError::MissingTravelDate])),
        };

        let candidates = self.repository.trains_between(origin, destination, date).await?;
        let trains = query(&candidates, criteria)?;

        tracing::info!(
            origin = %origin.code,
            destination = %destination.code,
            %date,
            class = %String::from(criteria.class_filter),
            results = trains.len(),
            "Train search"
        );

        Ok(trains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, delhi, mumbai, numbers};
    use async_trait::async_trait;
    use berth_catalog::CatalogError;
    use berth_core::{ClassFilter, ClassType, Station};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
    }

    #[test]
    fn test_query_all_classes() {
        let criteria = SearchCriteria::new(delhi(), mumbai(), date());
        let trains = query(&fixtures::trains(), &criteria).unwrap();
        assert_eq!(trains.len(), 5);
    }

    #[test]
    fn test_query_class_restriction() {
        let criteria = SearchCriteria::new(delhi(), mumbai(), date())
            .with_class(ClassFilter::Only(ClassType::AcFirstClass));
        let trains = query(&fixtures::trains(), &criteria).unwrap();
        assert_eq!(numbers(&trains), vec!["12301", "12953"]);
    }

    #[test]
    fn test_query_wrong_route() {
        let chennai = Station::new("3", "Chennai Central", "MAS");
        let criteria = SearchCriteria::new(delhi(), chennai, date());
        assert!(query(&fixtures::trains(), &criteria).unwrap().is_empty());
    }

    #[test]
    fn test_query_rejects_incomplete_criteria() {
        let criteria = SearchCriteria {
            origin: Some(delhi()),
            ..Default::default()
        };
        match query(&fixtures::trains(), &criteria) {
            Err(SearchError::InvalidCriteria(errors)) => {
                assert_eq!(
                    errors,
                    vec![ValidationError::MissingDestinationStation, ValidationError::MissingTravelDate]
                );
            }
            other => panic!("expected InvalidCriteria, got {:?}", other),
        }
    }

    struct StaticRepo;

    #[async_trait]
    impl TrainRepository for StaticRepo {
        async fn list_stations(&self) -> Result<Vec<Station>, CatalogError> {
            Ok(vec![delhi(), mumbai()])
        }

        async fn trains_between(
            &self,
            _origin: &Station,
            _destination: &Station,
            _date: NaiveDate,
        ) -> Result<Vec<Train>, CatalogError> {
            Ok(fixtures::trains())
        }
    }

    #[tokio::test]
    async fn test_train_query_end_to_end() {
        let engine = TrainQuery::new(Arc::new(StaticRepo));
        let criteria = SearchCriteria::new(delhi(), mumbai(), date())
            .with_class(ClassFilter::Only(ClassType::AcThreeTier));

        let trains = engine.search(&criteria).await.unwrap();
        assert!(!trains.is_empty());
        let three_tier = trains[0].class(ClassType::AcThreeTier).unwrap();
        assert_eq!(three_tier.fare, 1965);
    }
}
