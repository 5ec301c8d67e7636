use tokio_postgres::Client;

use crate::store::StoreError;

/// Database schema loaded on first use.
pub struct Schema {
    name: String,
    sql: &'static str,
}

struct Revision {
    pub major: i32,
    pub minor: i32,
}

impl Revision {
    fn check(&self) -> Result<(), StoreError> {
        if self.major != 1 || self.minor > 0 {
            return Err(StoreError::SchemaRevision {
                major: self.major,
                minor: self.minor,
            });
        }
        Ok(())
    }
}

impl Schema {
    pub fn new(name: &str, sql: &'static str) -> Self {
        Self {
            name: name.to_owned(),
            sql,
        }
    }

    /// Loads the schema if absent and checks its revision.
    ///
    /// Only revision 1.0 is supported, any other fails with
    /// `StoreError::SchemaRevision` as there are no migrations.
    pub async fn init(&self, client: &mut Client) -> Result<(), StoreError> {
        if !self.schema_exists(client).await? {
            self.load_schema(client).await?;
        }
        let rev = self.schema_revision(client).await?;
        rev.check()
    }

    async fn schema_revision(&self, client: &Client) -> Result<Revision, StoreError> {
        tracing::debug!("reading current revision");
        let qry = format!("select rev_major, rev_minor from {}._rev;", self.name);
        let row = client.query_one(&qry, &[]).await?;
        Ok(Revision {
            major: row.try_get(0)?,
            minor: row.try_get(1)?,
        })
    }

    async fn schema_exists(&self, client: &Client) -> Result<bool, StoreError> {
        tracing::debug!("checking for existing schema");
        let qry = "
        select exists(
            select schema_name
            from information_schema.schemata
            where schema_name = $1
        );";
        Ok(client.query_one(qry, &[&self.name]).await?.try_get(0)?)
    }

    async fn load_schema(&self, client: &mut Client) -> Result<(), StoreError> {
        tracing::info!("loading schema {}", self.name);
        let tx = client.transaction().await?;
        tx.batch_execute(self.sql).await?;
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Revision;
    use crate::store::StoreError;

    #[test]
    fn test_supported_revision() {
        assert!(Revision { major: 1, minor: 0 }.check().is_ok());
    }

    #[test]
    fn test_unsupported_revisions() {
        for (major, minor) in [(1, 1), (2, 0), (0, 9)] {
            assert!(matches!(
                Revision { major, minor }.check(),
                Err(StoreError::SchemaRevision { .. })
            ));
        }
    }
}
