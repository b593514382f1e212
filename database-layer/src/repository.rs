//! Generic CRUD repository
//!
//! One implementation of create / list / get / update / delete serves every
//! entity type; the entity's [`TableSchema`](crate::TableSchema) supplies the
//! table layout. All failures are explicit: a missing id is always
//! [`DatabaseError::NotFound`], never an empty value handed to the caller.

use std::marker::PhantomData;

use crate::entity::Entity;
use crate::error::DatabaseResult;
use crate::postgres;
use crate::store::Store;

pub struct Repository<E> {
    store: Store,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> std::fmt::Debug for Repository<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("entity", &std::any::type_name::<E>())
            .field("backend", &self.store.backend())
            .finish()
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    /// Persist a new row; the id is assigned by the store
    pub async fn create(&self, fields: E::Fields) -> DatabaseResult<E> {
        match &self.store {
            Store::Postgres(pool) => postgres::create::<E>(pool.pool(), fields).await,
            Store::Memory(store) => store.create::<E>(fields),
        }
    }

    /// Snapshot of all rows, ordered by id
    pub async fn list(&self) -> DatabaseResult<Vec<E>> {
        match &self.store {
            Store::Postgres(pool) => postgres::list::<E>(pool.pool()).await,
            Store::Memory(store) => store.list::<E>(),
        }
    }

    /// Fails with `NotFound` when no row has this id
    pub async fn get_by_id(&self, id: i32) -> DatabaseResult<E> {
        match &self.store {
            Store::Postgres(pool) => postgres::get::<E>(pool.pool(), id).await,
            Store::Memory(store) => store.get::<E>(id),
        }
    }

    /// Replace every mutable field of an existing row, keeping its id
    pub async fn update(&self, id: i32, fields: E::Fields) -> DatabaseResult<E> {
        match &self.store {
            Store::Postgres(pool) => postgres::update::<E>(pool.pool(), id, fields).await,
            Store::Memory(store) => store.update::<E>(id, fields),
        }
    }

    /// Remove a row; fails with `NotFound` when no row has this id
    pub async fn delete_by_id(&self, id: i32) -> DatabaseResult<()> {
        match &self.store {
            Store::Postgres(pool) => postgres::delete::<E>(pool.pool(), id).await,
            Store::Memory(store) => store.delete::<E>(id),
        }
    }
}
