// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bulk write accumulation.
//!
//! A [`BulkWriteBuilder`] collects write models for one collection. It performs
//! no I/O; the resulting [`BulkWrite`] is handed to the driver for execution.

use crate::domain::{Alias, Options};

/// A single write in a bulk operation.
#[derive(Clone, Debug, PartialEq)]
pub enum WriteModel {
    /// Inserts a document.
    InsertOne {
        /// The document to insert.
        document: Options,
    },
    /// Updates the first document matching `filter`.
    UpdateOne {
        /// Selects the document.
        filter: Options,
        /// Update operators to apply.
        update: Options,
        /// Insert when nothing matches.
        upsert: bool,
    },
    /// Replaces the first document matching `filter`.
    ReplaceOne {
        /// Selects the document.
        filter: Options,
        /// The new document.
        replacement: Options,
        /// Insert when nothing matches.
        upsert: bool,
    },
    /// Deletes the first document matching `filter`.
    DeleteOne {
        /// Selects the document.
        filter: Options,
    },
    /// Deletes every document matching `filter`.
    DeleteMany {
        /// Selects the documents.
        filter: Options,
    },
}

/// A finished bulk write, ready for the driver.
#[derive(Clone, Debug, PartialEq)]
pub struct BulkWrite {
    /// Target database.
    pub database: String,
    /// Target collection.
    pub collection: String,
    /// Stop at the first failing write.
    pub ordered: bool,
    /// The writes, in the order they were added.
    pub models: Vec<WriteModel>,
}

impl BulkWrite {
    /// The `<database>.<collection>` namespace.
    pub fn namespace(&self) -> String {
        format!("{}.{}", self.database, self.collection)
    }
}

/// Accumulates write models for one collection.
///
/// # Examples
///
/// ```rust
/// use odmwire::domain::{OptionValue, Options};
/// use odmwire::service::BulkWriteBuilderFactory;
///
/// let mut post = Options::new();
/// post.insert("title".to_string(), OptionValue::from("Hello"));
///
/// let mut builder = BulkWriteBuilderFactory::new("main").create("blog", "posts");
/// builder.insert_one(post).delete_many(Options::new());
///
/// let bulk = builder.ordered(false).build();
/// assert_eq!(bulk.namespace(), "blog.posts");
/// assert_eq!(bulk.models.len(), 2);
/// assert!(!bulk.ordered);
/// ```
#[derive(Clone, Debug)]
pub struct BulkWriteBuilder {
    database: String,
    collection: String,
    ordered: bool,
    models: Vec<WriteModel>,
}

impl BulkWriteBuilder {
    /// Creates an ordered, empty builder.
    pub fn new(database: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            collection: collection.into(),
            ordered: true,
            models: Vec::new(),
        }
    }

    /// Target collection.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Sets whether the writes run in order. Defaults to true.
    pub fn ordered(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
        self
    }

    /// Adds an arbitrary write model.
    pub fn add(&mut self, model: WriteModel) -> &mut Self {
        self.models.push(model);
        self
    }

    /// Adds an insert.
    pub fn insert_one(&mut self, document: Options) -> &mut Self {
        self.add(WriteModel::InsertOne { document })
    }

    /// Adds a single-document update.
    pub fn update_one(&mut self, filter: Options, update: Options, upsert: bool) -> &mut Self {
        self.add(WriteModel::UpdateOne {
            filter,
            update,
            upsert,
        })
    }

    /// Adds a replacement.
    pub fn replace_one(&mut self, filter: Options, replacement: Options, upsert: bool) -> &mut Self {
        self.add(WriteModel::ReplaceOne {
            filter,
            replacement,
            upsert,
        })
    }

    /// Adds a single-document delete.
    pub fn delete_one(&mut self, filter: Options) -> &mut Self {
        self.add(WriteModel::DeleteOne { filter })
    }

    /// Adds a multi-document delete.
    pub fn delete_many(&mut self, filter: Options) -> &mut Self {
        self.add(WriteModel::DeleteMany { filter })
    }

    /// Number of writes added so far.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns true when no write was added.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Finishes the bulk write.
    pub fn build(self) -> BulkWrite {
        BulkWrite {
            database: self.database,
            collection: self.collection,
            ordered: self.ordered,
            models: self.models,
        }
    }
}

/// Creates bulk write builders for the databases of one connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulkWriteBuilderFactory {
    connection: Alias,
}

impl BulkWriteBuilderFactory {
    /// Creates the factory of the connection `connection`.
    pub fn new(connection: impl Into<Alias>) -> Self {
        Self {
            connection: connection.into(),
        }
    }

    /// The connection this factory belongs to.
    pub fn connection(&self) -> &Alias {
        &self.connection
    }

    /// Creates an empty builder for `database.collection`.
    pub fn create(&self, database: &str, collection: &str) -> BulkWriteBuilder {
        BulkWriteBuilder::new(database, collection)
    }
}
