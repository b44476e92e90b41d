use approach_catalog::{CatalogClient, ImportLoader, MenuResolver, SqliteCatalogStore};
use std::sync::Arc;
use tempfile::NamedTempFile;

pub struct TestCatalog {
    pub store: SqliteCatalogStore,
    pub client: CatalogClient,
    pub loader: ImportLoader,
    pub resolver: MenuResolver,
}

pub fn setup_test_catalog() -> anyhow::Result<TestCatalog> {
    let store = SqliteCatalogStore::open_in_memory()?;
    let client = CatalogClient::new(Arc::new(store.clone()));

    Ok(TestCatalog {
        loader: ImportLoader::new(client.clone()),
        resolver: MenuResolver::new(client.clone()),
        client,
        store,
    })
}

pub fn write_csv(rows: &[(&str, &str, &str, &str)]) -> anyhow::Result<NamedTempFile> {
    let file = NamedTempFile::new()?;
    let mut writer = csv::Writer::from_path(file.path())?;
    writer.write_record(["Topic", "Question", "Approach", "Intuition"])?;
    for (topic, question, approach, intuition) in rows {
        writer.write_record([topic, question, approach, intuition])?;
    }
    writer.flush()?;
    Ok(file)
}
