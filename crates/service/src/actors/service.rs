use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::actors::repository::ActorRepository;
use crate::domain::{Actor, ActorUpdate, NewActor};
use crate::errors::ServiceError;
use crate::merge::merge_actor;
use crate::reconcile::{reconcile, Counterpart};

/// Actor use cases on top of an [`ActorRepository`].
pub struct ActorsService<R: ActorRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ActorRepository + ?Sized> ActorsService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Validate and store a new actor linked to `input.films`.
    ///
    /// # Examples
    /// ```
    /// use service::actors::{ActorsService, repository::mock::MockActorRepository};
    /// use service::domain::{ActorInfo, NewActor};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockActorRepository::default());
    /// let svc = ActorsService::new(repo.clone());
    /// let info = ActorInfo {
    ///     name: "Maxim".into(),
    ///     second_name: "Sizask".into(),
    ///     patronymic: "Edu".into(),
    ///     sex: "Male".into(),
    ///     date_of_birth: "2000-01-01".into(),
    /// };
    /// let id = tokio_test::block_on(svc.add_actor(NewActor { info, films: vec![] })).unwrap();
    /// assert_eq!(repo.creates().len(), 1);
    /// assert_eq!(tokio_test::block_on(svc.get_actor_by_id(id)).unwrap().name, "Maxim");
    /// ```
    #[instrument(skip(self, input), fields(films = input.films.len()))]
    pub async fn add_actor(&self, input: NewActor) -> Result<Uuid, ServiceError> {
        let fields = input.info.validate().map_err(|e| {
            debug!(error = %e, "actor rejected");
            e
        })?;
        let id = self.repo.create(&fields, &input.films).await?;
        info!(actor_id = %id, "actor_created");
        Ok(id)
    }

    /// Apply a partial update. Empty fields keep their stored values; the
    /// merged actor is validated again and link changes are checked against
    /// the links stored before this update.
    #[instrument(skip(self, input), fields(actor_id = %input.id))]
    pub async fn update_actor(&self, input: ActorUpdate) -> Result<(), ServiceError> {
        let current = self.repo.get_by_id(input.id).await?;

        let fields = merge_actor(&input.info, &current).validate().map_err(|e| {
            debug!(error = %e, "merged actor rejected");
            e
        })?;

        if !input.films_to_add.is_empty() || !input.films_to_del.is_empty() {
            reconcile(
                Counterpart::Film,
                current.films.iter().map(|f| f.id),
                &input.films_to_add,
                &input.films_to_del,
            )
            .map_err(|e| {
                debug!(error = %e, "film links rejected");
                e
            })?;
        }

        self.repo
            .edit(input.id, &fields, &input.films_to_add, &input.films_to_del)
            .await?;
        info!(added = input.films_to_add.len(), removed = input.films_to_del.len(), "actor_updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_actor(&self, id: Uuid) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        info!("actor_deleted");
        Ok(())
    }

    pub async fn get_all_actors(&self) -> Result<Vec<Actor>, ServiceError> {
        self.repo.get_all().await
    }

    pub async fn get_actor_by_id(&self, id: Uuid) -> Result<Actor, ServiceError> {
        self.repo.get_by_id(id).await
    }

    pub async fn get_actors_by_name(&self, name: &str) -> Result<Vec<Actor>, ServiceError> {
        self.repo.get_by_name(name).await
    }
}
