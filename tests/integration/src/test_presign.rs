//! Presigned upload and download round trips.

#[cfg(test)]
mod tests {
    use contenthost_core::media::plan_upload_with_id;

    use crate::{cleanup_bucket, create_test_bucket, s3_client, store_client};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_upload_and_download_through_presigned_urls() {
        let s3 = s3_client();
        let bucket = create_test_bucket(&s3, "presign").await;
        let store = store_client(&bucket);
        let http = reqwest::Client::new();

        let plan = plan_upload_with_id("clip.mp4", "video/mp4", Some(12), "abc123def456")
            .expect("plan upload");
        let upload = store
            .upload_url(&plan.key, &plan.content_type)
            .expect("sign upload");

        let resp = http
            .put(&upload.url)
            .header("content-type", &plan.content_type)
            .body("hello, video")
            .send()
            .await
            .expect("presigned put");
        assert!(resp.status().is_success(), "put status: {}", resp.status());

        let head = s3
            .head_object()
            .bucket(&bucket)
            .key(&plan.key)
            .send()
            .await
            .expect("head_object");
        assert_eq!(head.content_length(), Some(12));

        let download = store.download_url(&plan.key).expect("sign download");
        let resp = http.get(&download.url).send().await.expect("presigned get");
        assert!(resp.status().is_success(), "get status: {}", resp.status());
        assert_eq!(resp.text().await.expect("body"), "hello, video");

        cleanup_bucket(&s3, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_download_key_with_reserved_characters() {
        let s3 = s3_client();
        let bucket = create_test_bucket(&s3, "reserved").await;
        let store = store_client(&bucket);
        let key = "images/a b (1)!*'.png";

        s3.put_object()
            .bucket(&bucket)
            .key(key)
            .body(aws_sdk_s3::primitives::ByteStream::from_static(b"png"))
            .send()
            .await
            .expect("put_object");

        let signed = store.get_url(key, 60).expect("sign get");
        assert!(signed.url.contains("/images/a%20b%20%281%29%21%2A%27.png?"));

        let resp = reqwest::get(&signed.url).await.expect("presigned get");
        assert!(resp.status().is_success(), "get status: {}", resp.status());
        assert_eq!(resp.text().await.expect("body"), "png");

        cleanup_bucket(&s3, &bucket).await;
    }
}
