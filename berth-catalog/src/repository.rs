use async_trait::async_trait;
use chrono::NaiveDate;
use berth_core::Station;
use crate::train::Train;
use crate::CatalogError;

/// Read-only access to stations and the trains running between them.
#[async_trait]
pub trait TrainRepository: Send + Sync {
    async fn list_stations(&self) -> Result<Vec<Station>, CatalogError>;

    async fn find_station(&self, code: &str) -> Result<Option<Station>, CatalogError> {
        let stations = self.list_stations().await?;
        Ok(stations.into_iter().find(|s| s.code.eq_ignore_ascii_case(code)))
    }

    /// Candidate trains for a route and date. Train identity is only stable
    /// within one result set.
    async fn trains_between(
        &self,
        origin: &Station,
        destination: &Station,
        date: NaiveDate,
    ) -> Result<Vec<Train>, CatalogError>;

    async fn find_train(
        &self,
        number: &str,
        origin: &Station,
        destination: &Station,
        date: NaiveDate,
    ) -> Result<Option<Train>, CatalogError> {
        let trains = self.trains_between(origin, destination, date).await?;
        Ok(trains.into_iter().find(|t| t.number == number))
    }
}
