use greeter::{
    handler::handle,
    my_aws::{MyAwsConfig, MyDynamoDb},
    schema::build_schema,
    types::Settings,
};
use lambda_http::{handler, Request};
use lambda_runtime::{Context, Error};
use log::info;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    env_logger::init();

    let settings = Settings::new()?;
    let config = MyAwsConfig::new(&settings.aws_origin)?;
    let store = MyDynamoDb::from_config(&config, &settings.dynamodb_table);
    info!(
        "serving table {} ({})",
        settings.dynamodb_table, settings.aws_origin
    );

    let schema = build_schema(Arc::new(store));
    let func = handler(move |request: Request, _: Context| {
        let schema = schema.clone();
        async move { handle(&schema, request).await }
    });
    lambda_runtime::run(func).await?;
    Ok(())
}
