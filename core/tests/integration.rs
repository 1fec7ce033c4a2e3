//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port and drives it through
//! `ApiClient` backed by the real `UreqTransport`, so request building,
//! multipart encoding, interception and parsing are all exercised over HTTP.
//! DTOs in `parish_core` and the server's documents evolve separately; these
//! tests catch schema drift between them.

use chrono::{Duration as ChronoDuration, Utc};
use parish_core::hooks::{self, QueryStatus};
use parish_core::{
    ApiClient, ApiError, ClientConfig, DonationQuery, DonationUpdate, EventInput, FilePart, NewDonation,
    PaymentStatus, PrayerRequestForm, ProjectQuery, ResourceCategory, ResourceInput, TestimonyCategory,
    TestimonyForm, TestimonyQuery, TestimonyStatus, TestimonyUpdate,
};

async fn start_server() -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { mock_server::run(listener).await });
    ApiClient::with_ureq(ClientConfig::new(&format!("http://{addr}/api")))
}

fn donation(amount: f64, status: PaymentStatus) -> NewDonation {
    NewDonation {
        amount,
        currency: "EUR".to_string(),
        donation_type: "offering".to_string(),
        payment_method: "card".to_string(),
        payment_status: status,
        donor_name: Some("Integration".to_string()),
        donor_email: None,
        notes: None,
        project_id: None,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn donation_crud_lifecycle() {
    let client = start_server().await;
    let donations = client.donations();

    assert!(donations.list(&DonationQuery::default()).await.unwrap().data.is_empty());

    let created = donations.create(&donation(42.5, PaymentStatus::Pending)).await.unwrap();
    assert_eq!(created.amount, 42.5);
    assert_eq!(created.payment_status, PaymentStatus::Pending);
    assert!(created.created_at.is_some());

    let first = donations.get(&created.id).await.unwrap();
    let second = donations.get(&created.id).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first, created);

    let updated = donations
        .update(
            &created.id,
            &DonationUpdate {
                payment_status: Some(PaymentStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.payment_status, PaymentStatus::Completed);
    assert_eq!(updated.id, created.id);

    let completed = donations
        .list(&DonationQuery {
            payment_status: Some(PaymentStatus::Completed),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(completed.data.len(), 1);
    assert_eq!(completed.pagination.unwrap().total, Some(1));

    donations.delete(&created.id).await.unwrap();
    let missing = donations.get(&created.id).await.unwrap_err();
    assert!(missing.is_not_found());
    assert_eq!(missing.server_message().as_deref(), Some("donations: not found"));
    assert!(donations.delete(&created.id).await.unwrap_err().is_not_found());
}

#[tokio::test(flavor = "multi_thread")]
async fn donations_hook_drops_deleted_row_on_refetch() {
    let client = start_server().await;
    let keep = client.donations().create(&donation(10.0, PaymentStatus::Completed)).await.unwrap();
    let gone = client.donations().create(&donation(20.0, PaymentStatus::Completed)).await.unwrap();

    let mut query = hooks::donations(client.clone(), DonationQuery::default());
    let state = query.settled().await;
    assert_eq!(state.status, QueryStatus::Ready);
    assert_eq!(state.data.unwrap().len(), 2);

    client.donations().delete(&gone.id).await.unwrap();
    query.refetch();
    let ids: Vec<String> = query
        .settled()
        .await
        .data
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(ids, vec![keep.id]);
}

fn testimony(images: usize) -> TestimonyForm {
    TestimonyForm {
        title: "Une grâce".to_string(),
        content: "Le Seigneur a exaucé nos prières".to_string(),
        author_name: "Claire".to_string(),
        author_email: "claire@example.org".to_string(),
        author_location: "Lyon".to_string(),
        category: TestimonyCategory::Guerison,
        images: (0..images)
            .map(|i| FilePart::new(format!("photo-{i}.png"), "image/png", vec![0x89, b'P', b'N', b'G', i as u8]))
            .collect(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn testimony_submission_and_moderation() {
    let client = start_server().await;
    let testimonies = client.testimonies();

    let plain = testimonies.submit_form(&testimony(0)).await.unwrap();
    assert!(plain.success);
    let plain = plain.data.unwrap();
    assert_eq!(plain.status, TestimonyStatus::Pending);
    assert!(plain.images.is_empty());

    let with_images = testimonies.submit_form(&testimony(3)).await.unwrap().data.unwrap();
    assert_eq!(with_images.images.len(), 3);
    assert_eq!(with_images.author_location.as_deref(), Some("Lyon"));
    assert_eq!(with_images.category, TestimonyCategory::Guerison);

    let wall = hooks::testimony_wall_params(Some(TestimonyCategory::Guerison), Some(true));
    assert!(testimonies.list_approved(&wall).await.unwrap().data.is_empty());

    testimonies
        .update(
            &with_images.id,
            &TestimonyUpdate {
                status: Some(TestimonyStatus::Approved),
                is_featured: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let approved = testimonies.list_approved(&wall).await.unwrap().data;
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].id, with_images.id);

    let query = hooks::approved_testimonies(client.clone(), Some(TestimonyCategory::Guerison), Some(true));
    assert_eq!(query.settled().await.data.unwrap().len(), 1);

    let queue = testimonies.list(&TestimonyQuery::default()).await.unwrap();
    assert_eq!(queue.data.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn anonymous_prayer_request_is_stored_without_name() {
    let client = start_server().await;
    let form = PrayerRequestForm {
        title: "Pour mon frère".to_string(),
        description: "Qu'il retrouve la foi et la paix".to_string(),
        requester_name: "Samuel".to_string(),
        is_anonymous: true,
        ..Default::default()
    };
    let created = client.prayer_requests().submit_form(&form).await.unwrap();
    assert!(created.requester_name.is_none());
    assert_eq!(created.status, "active");
    assert_eq!(created.prayer_count, 0);

    let public = client
        .prayer_requests()
        .list_public(&Default::default())
        .await
        .unwrap();
    assert_eq!(public.data.len(), 1);
    assert_eq!(public.data[0].id, created.id);
}

#[tokio::test(flavor = "multi_thread")]
async fn upcoming_events_exclude_past_ones() {
    let client = start_server().await;
    let now = Utc::now();
    for (title, offset_days) in [("Passé", -3), ("Bientôt", 2), ("Plus tard", 10)] {
        client
            .events()
            .create(&EventInput {
                title: Some(title.to_string()),
                start_date: Some(now + ChronoDuration::days(offset_days)),
                ..Default::default()
            })
            .await
            .unwrap();
    }
    let titles: Vec<String> = client
        .events()
        .upcoming(now)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["Bientôt", "Plus tard"]);
    assert_eq!(client.events().list().await.unwrap().len(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn resources_are_grouped_and_downloads_counted() {
    let client = start_server().await;
    let resources = client.resources();
    let book = resources
        .create(&ResourceInput {
            title: Some("Catéchisme".to_string()),
            category: Some(ResourceCategory::Book),
            file_url: Some("/files/catechisme.pdf".to_string()),
            is_published: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    resources
        .create(&ResourceInput {
            title: Some("Quand ont lieu les messes ?".to_string()),
            category: Some(ResourceCategory::Faq),
            is_published: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();

    let grouped = resources.grouped().await.unwrap();
    assert_eq!(grouped.books.len(), 1);
    assert_eq!(grouped.faqs.len(), 1);
    assert!(grouped.songs.is_empty());

    resources.increment_download(&book.id).await.unwrap();
    assert_eq!(resources.get(&book.id).await.unwrap().download_count, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn unpublished_projects_stay_private() {
    let client = start_server().await;
    let published = client
        .projects()
        .list_published(&ProjectQuery::default())
        .await
        .unwrap();
    assert!(published.data.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = ApiClient::with_ureq(ClientConfig::new(&format!("http://{addr}/api")));
    let err = client.sermons().list().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
}
