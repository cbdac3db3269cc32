use crate::record::{FieldSpec, FieldValue, Record};
use crate::scrape::text::extract_labelled_count;
use crate::scrape::{Document, Extract};

/// A LinkedIn company page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Company {
    pub follower_count: u64,
    pub founded_on: String,
    pub headline: String,
    pub headquarters: String,
    pub industry: String,
    pub name: String,
    pub size: String,
    pub specialties: String,
    pub company_type: String,
    pub website: String,
}

static SCHEMA: [FieldSpec<Company>; 10] = [
    FieldSpec::new("followerCount", |c| FieldValue::Count(c.follower_count)),
    FieldSpec::new("foundedOn", |c| FieldValue::Text(&c.founded_on)),
    FieldSpec::new("headline", |c| FieldValue::Text(&c.headline)),
    FieldSpec::new("headquarters", |c| FieldValue::Text(&c.headquarters)),
    FieldSpec::new("industry", |c| FieldValue::Text(&c.industry)),
    FieldSpec::new("name", |c| FieldValue::Text(&c.name)),
    FieldSpec::new("size", |c| FieldValue::Text(&c.size)),
    FieldSpec::new("specialties", |c| FieldValue::Text(&c.specialties)),
    FieldSpec::new("type", |c| FieldValue::Text(&c.company_type)),
    FieldSpec::new("website", |c| FieldValue::Text(&c.website)),
];

impl Record for Company {
    const NAME: &'static str = "company";

    fn schema() -> &'static [FieldSpec<Self>] {
        &SCHEMA
    }
}

fn about_us(doc: &Document, item: &str) -> String {
    doc.text(&format!("div[data-test-id='about-us__{}'] dd", item))
}

impl Extract for Company {
    fn extract(doc: &Document, _url: &str) -> Self {
        let subline = doc.text(".top-card-layout__first-subline");
        Company {
            follower_count: extract_labelled_count(&subline, "followers").unwrap_or_default(),
            founded_on: about_us(doc, "foundedOn"),
            headline: doc.text(".top-card-layout__second-subline"),
            headquarters: about_us(doc, "headquarters"),
            industry: about_us(doc, "industry"),
            name: doc.text(".top-card-layout__title"),
            size: about_us(doc, "size"),
            specialties: about_us(doc, "specialties"),
            company_type: about_us(doc, "organizationType"),
            website: about_us(doc, "website"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::{ClientConfig, ScrapeClient, fetch_record};
    use mockito::Server;
    use std::time::Duration;

    const PAGE: &str = r#"
        <html><body>
          <section class="top-card-layout">
            <h1 class="top-card-layout__title"> Acme Corp </h1>
            <h4 class="top-card-layout__second-subline">Making anvils since 1920</h4>
            <h3 class="top-card-layout__first-subline">
              Manufacturing  Brussels, Brussels Region  1,234 followers
            </h3>
          </section>
          <dl>
            <div data-test-id="about-us__website"><dt>Website</dt><dd> https://acme.example </dd></div>
            <div data-test-id="about-us__industry"><dt>Industry</dt><dd>Manufacturing</dd></div>
            <div data-test-id="about-us__size"><dt>Company size</dt><dd>51-200 employees</dd></div>
            <div data-test-id="about-us__headquarters"><dt>Headquarters</dt><dd>Brussels, Brussels Region</dd></div>
            <div data-test-id="about-us__organizationType"><dt>Type</dt><dd>Privately Held</dd></div>
            <div data-test-id="about-us__foundedOn"><dt>Founded</dt><dd>1920</dd></div>
            <div data-test-id="about-us__specialties"><dt>Specialties</dt><dd>Anvils, Rockets</dd></div>
          </dl>
        </body></html>
    "#;

    #[test]
    fn test_extract_company() {
        let doc = Document::parse_str(PAGE);
        let company = Company::extract(&doc, "https://www.linkedin.com/company/acme");
        assert_eq!(
            company,
            Company {
                follower_count: 1234,
                founded_on: "1920".to_string(),
                headline: "Making anvils since 1920".to_string(),
                headquarters: "Brussels, Brussels Region".to_string(),
                industry: "Manufacturing".to_string(),
                name: "Acme Corp".to_string(),
                size: "51-200 employees".to_string(),
                specialties: "Anvils, Rockets".to_string(),
                company_type: "Privately Held".to_string(),
                website: "https://acme.example".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_followers_is_zero() {
        let doc = Document::parse_str(
            r#"<h1 class="top-card-layout__title">Quiet Ltd</h1>
               <h3 class="top-card-layout__first-subline">Consulting</h3>"#,
        );
        let company = Company::extract(&doc, "");
        assert_eq!(company.follower_count, 0);
        assert_eq!(company.name, "Quiet Ltd");
        assert_eq!(company.website, "");
    }

    #[test]
    fn test_company_csv_layout() {
        assert_eq!(
            Company::csv_header(),
            "followerCount|foundedOn|headline|headquarters|industry|name|size|specialties|type|website"
        );
        let company = Company {
            name: "Acme".to_string(),
            specialties: "Anvils|Rockets".to_string(),
            ..Default::default()
        };
        assert_eq!(company.csv_row(), "|||||Acme||Anvils Rockets||");
    }

    #[tokio::test]
    async fn test_fetch_company_followers() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/company/acme")
            .with_status(200)
            .with_body(PAGE)
            .create_async()
            .await;

        let client = ScrapeClient::new(ClientConfig::builder().pacing(Duration::ZERO).build()).unwrap();
        let url = format!("{}/company/acme", server.url());
        let company: Company = fetch_record(&client, &url, false).await.unwrap();
        assert_eq!(company.follower_count, 1234);
        assert_eq!(company.name, "Acme Corp");
    }
}
