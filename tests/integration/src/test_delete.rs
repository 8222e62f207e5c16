//! Presigned delete integration tests.

#[cfg(test)]
mod tests {
    use aws_sdk_s3::primitives::ByteStream;
    use contenthost_store::DeleteOutcome;

    use crate::{cleanup_bucket, create_test_bucket, s3_client, store_client};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_delete_object_and_tolerate_repeat() {
        let s3 = s3_client();
        let bucket = create_test_bucket(&s3, "delete").await;
        let store = store_client(&bucket);

        s3.put_object()
            .bucket(&bucket)
            .key("videos/gone.mp4")
            .body(ByteStream::from_static(b"bye"))
            .send()
            .await
            .expect("put_object");

        let first = store
            .delete_object("videos/gone.mp4")
            .await
            .expect("first delete");
        assert_eq!(first, DeleteOutcome::Deleted);

        let head = s3
            .head_object()
            .bucket(&bucket)
            .key("videos/gone.mp4")
            .send()
            .await;
        assert!(head.is_err(), "object should be gone");

        // S3 answers 204 for a missing key, some stores answer 404.
        let second = store
            .delete_object("videos/gone.mp4")
            .await
            .expect("repeat delete");
        assert!(matches!(
            second,
            DeleteOutcome::Deleted | DeleteOutcome::AlreadyAbsent
        ));

        cleanup_bucket(&s3, &bucket).await;
    }
}
