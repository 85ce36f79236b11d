use async_graphql::{Context, EmptySubscription, Object, Schema};
use std::sync::Arc;

use crate::resolvers;
use crate::store::NicknameStore;

pub type GreeterSchema = Schema<Query, Mutation, EmptySubscription>;

pub struct Query;

#[Object]
impl Query {
    async fn greeting(
        &self,
        ctx: &Context<'_>,
        #[graphql(validator(min_length = 1))] first_name: String,
    ) -> async_graphql::Result<Option<String>> {
        let store = ctx.data::<Arc<dyn NicknameStore>>()?;
        Ok(Some(resolvers::get_greeting(store.as_ref(), &first_name).await?))
    }
}

pub struct Mutation;

#[Object]
impl Mutation {
    async fn change_nickname(
        &self,
        ctx: &Context<'_>,
        #[graphql(validator(min_length = 1))] first_name: String,
        #[graphql(validator(min_length = 1))] nickname: String,
    ) -> async_graphql::Result<Option<String>> {
        let store = ctx.data::<Arc<dyn NicknameStore>>()?;
        Ok(Some(
            resolvers::change_nickname(store.as_ref(), &first_name, &nickname).await?,
        ))
    }
}

pub fn build_schema(store: Arc<dyn NicknameStore>) -> GreeterSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(store)
        .finish()
}
