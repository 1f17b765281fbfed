use async_graphql::{Context, EmptySubscription, ErrorExtensions, ID, Object, Schema};
use tracing::info;

use crate::{
    identity::VoterIdentity,
    models::{CreatePollInput, NewPoll, Poll},
    store::Store,
};

pub type PollSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(store: Store) -> PollSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Looks a poll up by id. Unknown ids resolve to null.
    async fn poll(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Poll>> {
        let Ok(id) = id.parse::<i32>() else {
            return Ok(None);
        };

        let store = ctx.data::<Store>()?;
        let row = store.get_poll(id).await.map_err(|e| e.extend())?;

        Ok(row.map(Poll::from))
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_poll(
        &self,
        ctx: &Context<'_>,
        input: CreatePollInput,
    ) -> async_graphql::Result<Poll> {
        let poll = NewPoll::try_from(input).map_err(|e| e.extend())?;

        let voter = ctx
            .data_opt::<VoterIdentity>()
            .map(|identity| identity.voter_key(poll.protection));

        let store = ctx.data::<Store>()?;
        let row = store.create_poll(poll).await.map_err(|e| e.extend())?;

        info!(
            "Created poll {} with {} options, creator {:?}",
            row.id,
            row.options.len(),
            voter
        );

        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::{Request, Variables};
    use serde_json::{Value, json};

    const CREATE: &str = "mutation createPoll($input: CreatePollInput!) { createPoll(input: $input) { id options protection } }";

    fn lunch(options: Value) -> Variables {
        Variables::from_json(json!({
            "input": {
                "title": "Lunch?",
                "description": "",
                "owner": null,
                "options": options,
                "color": [135, 206, 235],
                "randomize": true,
                "protection": "cookie_id"
            }
        }))
    }

    fn identity() -> VoterIdentity {
        VoterIdentity {
            ip: None,
            cookie_id: Some("abc".into()),
        }
    }

    #[tokio::test]
    async fn create_poll_persists_normalized_options() {
        let store = Store::memory();
        let schema = build_schema(store.clone());

        let response = schema
            .execute(
                Request::new(CREATE)
                    .variables(lunch(json!(["Pizza", "Pizza", "  ", "Tacos"])))
                    .data(identity()),
            )
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().unwrap();
        let id = data["createPoll"]["id"].as_str().unwrap();
        assert!(!id.is_empty());
        assert_eq!(data["createPoll"]["options"], json!(["Pizza", "Tacos"]));
        assert_eq!(data["createPoll"]["protection"], "cookie_id");

        let stored = store.get_poll(id.parse().unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.options, ["Pizza", "Tacos"]);
    }

    #[tokio::test]
    async fn create_poll_without_identity_still_succeeds() {
        let store = Store::memory();
        let schema = build_schema(store.clone());

        let response = schema
            .execute(Request::new(CREATE).variables(lunch(json!(["Pizza"]))))
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn invalid_input_creates_nothing() {
        let store = Store::memory();
        let schema = build_schema(store.clone());

        let response = schema
            .execute(Request::new(CREATE).variables(lunch(json!(["", "   "]))))
            .await;

        assert_eq!(response.errors.len(), 1);
        let error = serde_json::to_value(&response.errors[0]).unwrap();
        assert_eq!(error["extensions"]["code"], "BAD_REQUEST");
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn poll_query_reads_back() {
        let store = Store::memory();
        let schema = build_schema(store);

        let created = schema
            .execute(Request::new(CREATE).variables(lunch(json!(["Pizza", "Tacos"]))))
            .await
            .data
            .into_json()
            .unwrap();
        let id = created["createPoll"]["id"].as_str().unwrap().to_string();

        let query = "query poll($id: ID!) { poll(id: $id) { title options color randomize } }";
        let found = schema
            .execute(Request::new(query).variables(Variables::from_json(json!({ "id": id }))))
            .await
            .data
            .into_json()
            .unwrap();

        assert_eq!(found["poll"]["title"], "Lunch?");
        assert_eq!(found["poll"]["options"], json!(["Pizza", "Tacos"]));
        assert_eq!(found["poll"]["color"], json!([135, 206, 235]));
        assert_eq!(found["poll"]["randomize"], true);

        for missing in ["999", "not-a-number"] {
            let response = schema
                .execute(
                    Request::new(query).variables(Variables::from_json(json!({ "id": missing }))),
                )
                .await;
            assert!(response.errors.is_empty());
            assert_eq!(response.data.into_json().unwrap()["poll"], Value::Null);
        }
    }
}
