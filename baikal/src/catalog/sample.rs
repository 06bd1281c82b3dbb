//! Built-in Baikal Systems catalog, used when no catalog file is configured

use super::{
    Catalog, ContentKind, ContentMetadata, ContentRecord, Media, MediaKind, PortfolioRecord,
    Pricing, Seo, ServiceRecord,
};
use chrono::{DateTime, NaiveDate, Utc};

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn timestamp(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    date(year, month, day)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn content(
    id: &str,
    kind: ContentKind,
    title: &str,
    body: &str,
    tags: &[&str],
    seo: Option<Seo>,
) -> ContentRecord {
    ContentRecord {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        body: body.to_string(),
        metadata: ContentMetadata {
            author: Some("Admin".to_string()),
            updated_at: timestamp(2024, 3, 1),
            published: true,
            tags: strings(tags),
            seo,
        },
        media: Vec::new(),
    }
}

/// The catalog the marketing site ships with
pub fn sample_catalog() -> Catalog {
    let mut hero = content(
        "1",
        ContentKind::Hero,
        "Baikal Systems - Innovative IT Solutions",
        "Designing the future of business with leading-edge technology. \
         We lead digital transformation through cloud, AI and blockchain.",
        &["hero", "main", "featured"],
        Some(Seo {
            title: Some("Baikal Systems - Innovative IT Solutions Company".to_string()),
            description: Some("Cloud, AI and blockchain IT solutions".to_string()),
            keywords: strings(&["IT solutions", "Cloud", "AI", "Blockchain", "Digital transformation"]),
        }),
    );
    hero.media.push(Media {
        kind: MediaKind::Image,
        url: "/images/baikal_logo.png".to_string(),
        alt: Some("Baikal Systems Logo".to_string()),
    });

    let about = content(
        "2",
        ContentKind::About,
        "About Baikal Systems",
        "A team of engineers building AI automation, RPA and public data platforms \
         for enterprises and the public sector.",
        &["company", "team"],
        None,
    );

    let contact = content(
        "3",
        ContentKind::Contact,
        "Contact",
        "Tell us about your project and we will get back to you within one business day.",
        &["contact", "inquiry"],
        None,
    );

    let portfolio = vec![
        PortfolioRecord {
            id: "1".to_string(),
            title: "Enterprise Cloud Migration".to_string(),
            description: "Cloud migration for a large enterprise, reaching 99.9% uptime".to_string(),
            category: "Cloud Solutions".to_string(),
            technologies: strings(&["AWS", "Kubernetes", "Docker", "Terraform"]),
            images: strings(&["/images/portfolio1.jpg"]),
            live_url: Some("https://example.com".to_string()),
            github_url: None,
            featured: true,
            completed_at: date(2024, 1, 15),
        },
        PortfolioRecord {
            id: "2".to_string(),
            title: "AI-Powered Analytics Dashboard".to_string(),
            description: "Real-time business intelligence dashboard built on machine learning"
                .to_string(),
            category: "AI & Machine Learning".to_string(),
            technologies: strings(&["Python", "TensorFlow", "React", "D3.js"]),
            images: strings(&["/images/portfolio2.jpg"]),
            live_url: None,
            github_url: Some("https://github.com/example".to_string()),
            featured: true,
            completed_at: date(2024, 2, 20),
        },
        PortfolioRecord {
            id: "3".to_string(),
            title: "RPA Workflow Automation System".to_string(),
            description: "Unattended back-office automation running around the clock".to_string(),
            category: "RPA".to_string(),
            technologies: strings(&["RPA", "Python", "Selenium", "OCR"]),
            images: Vec::new(),
            live_url: None,
            github_url: None,
            featured: false,
            completed_at: date(2023, 11, 3),
        },
        PortfolioRecord {
            id: "4".to_string(),
            title: "Public Data Integration Platform".to_string(),
            description: "Unified dashboards over open government data APIs".to_string(),
            category: "Public Data".to_string(),
            technologies: strings(&["API", "React", "D3.js", "Node.js"]),
            images: Vec::new(),
            live_url: None,
            github_url: None,
            featured: false,
            completed_at: date(2023, 8, 21),
        },
    ];

    let services = vec![
        ServiceRecord {
            id: "1".to_string(),
            name: "Cloud Infrastructure".to_string(),
            description: "Scalable and secure cloud infrastructure, built and operated".to_string(),
            category: "Infrastructure".to_string(),
            features: strings(&[
                "Auto Scaling",
                "24/7 Monitoring",
                "Security Compliance",
                "Cost Optimization",
            ]),
            pricing: Some(Pricing {
                basic: 500_000,
                premium: 1_500_000,
                enterprise: 3_000_000,
            }),
            icon: "Cloud".to_string(),
        },
        ServiceRecord {
            id: "2".to_string(),
            name: "AI Development".to_string(),
            description: "Custom AI solutions and integration with existing systems".to_string(),
            category: "Artificial Intelligence".to_string(),
            features: strings(&[
                "Custom ML Models",
                "Natural Language Processing",
                "Computer Vision",
                "Predictive Analytics",
            ]),
            pricing: Some(Pricing {
                basic: 800_000,
                premium: 2_000_000,
                enterprise: 5_000_000,
            }),
            icon: "Brain".to_string(),
        },
        ServiceRecord {
            id: "3".to_string(),
            name: "AI Automation".to_string(),
            description: "Code generation, AI-assisted debugging and performance tuning".to_string(),
            category: "Automation".to_string(),
            features: strings(&[
                "Code Generation",
                "AI Debugging",
                "Performance Optimization",
                "Security Hardening",
            ]),
            pricing: None,
            icon: "Bot".to_string(),
        },
    ];

    Catalog {
        content: vec![hero, about, contact],
        portfolio,
        services,
    }
}
