//! Plain-text report of a Meta database.

use std::io::Write;

use serde_json::Value;

use crate::{client::Inspect, error::Error};

/// Collection whose indexes are reported.
pub const INDEXED_COLLECTION: &str = "tapis_meta";

/// Header line of the collections section.
pub const COLLECTIONS_HEADER: &str = "**** Collections";

/// Fetch and write both report sections.
///
/// Each section is written only after its request succeeded, so a failed
/// collections listing produces no output and no index request.
pub async fn write_report<C, W>(client: &C, out: &mut W) -> Result<(), Error>
where
    C: Inspect,
    W: Write,
{
    let collections = client.list_collections().await?;
    write_section(out, COLLECTIONS_HEADER, &collections)?;

    let indexes = client.list_indexes(INDEXED_COLLECTION).await?;
    write_section(out, &format!("**** {INDEXED_COLLECTION} Indexes"), &indexes)?;

    out.flush()?;
    Ok(())
}

fn write_section<W: Write>(out: &mut W, header: &str, body: &Value) -> Result<(), Error> {
    writeln!(out)?;
    writeln!(out, "{header}")?;
    writeln!(out)?;
    writeln!(out, "{}", serde_json::to_string_pretty(body)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use reqwest::StatusCode;
    use serde_json::{Value, json};

    use crate::{
        client::Inspect,
        error::Error,
        report::{INDEXED_COLLECTION, write_report},
    };

    #[derive(Default)]
    struct FakeMeta {
        fail_collections: bool,
        calls: Mutex<Vec<String>>,
    }

    impl Inspect for FakeMeta {
        async fn list_collections(&self) -> Result<Value, Error> {
            self.calls.lock().unwrap().push("collections".into());
            if self.fail_collections {
                return Err(Error::Remote {
                    status: StatusCode::UNAUTHORIZED,
                    url: "https://vdj.tapis.io/v3/meta/v1airr".into(),
                    body: r#"{"http status":401}"#.into(),
                });
            }
            Ok(json!({"result": ["a", "b"]}))
        }

        async fn list_indexes(&self, collection: &str) -> Result<Value, Error> {
            self.calls.lock().unwrap().push(format!("indexes:{collection}"));
            Ok(json!([{"v": 2, "key": {"_id": 1}, "name": "_id_"}]))
        }
    }

    #[tokio::test]
    async fn writes_both_sections_in_order() {
        let meta = FakeMeta::default();
        let mut out = Vec::new();
        write_report(&meta, &mut out).await.expect("should succeed");
        let text = String::from_utf8(out).unwrap();

        let expected_collections = "\n**** Collections\n\n{\n  \"result\": [\n    \"a\",\n    \"b\"\n  ]\n}\n";
        assert!(text.starts_with(expected_collections));
        assert!(text.contains("\n**** tapis_meta Indexes\n\n[\n  {\n"));
        assert!(text.find("Collections").unwrap() < text.find("Indexes").unwrap());
        assert_eq!(
            *meta.calls.lock().unwrap(),
            vec!["collections".to_string(), format!("indexes:{INDEXED_COLLECTION}")]
        );
    }

    #[tokio::test]
    async fn failed_collections_stop_the_report() {
        let meta = FakeMeta {
            fail_collections: true,
            ..Default::default()
        };
        let mut out = Vec::new();
        let result = write_report(&meta, &mut out).await;
        assert!(matches!(result, Err(Error::Remote { status, .. }) if status == StatusCode::UNAUTHORIZED));
        assert!(out.is_empty());
        assert_eq!(*meta.calls.lock().unwrap(), vec!["collections".to_string()]);
    }
}
