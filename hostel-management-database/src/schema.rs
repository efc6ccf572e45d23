diesel::table! {
    /// One row per stored document. `data` always holds a JSON object;
    /// `collection` partitions the namespace the way the application's
    /// document collections do.
    documents (collection, id) {
        collection -> Text,
        id -> Text,
        data -> Jsonb,
    }
}
