use async_trait::async_trait;
use common::{
    AccountExecutive, AccountExecutiveList, CreateExecutiveRequest, ExecutivePerformance,
    UserContext,
};
use compute::{FetchContext, GatewayError, RowSource};
use serde_json::Value;
use crate::api_client;

/// Account executives table rows
pub struct ExecutiveSource;

#[async_trait(?Send)]
impl RowSource<AccountExecutive> for ExecutiveSource {
    async fn fetch_rows(&self, ctx: &FetchContext) -> Result<Vec<AccountExecutive>, GatewayError> {
        get_account_executives(ctx).await
    }
}

pub async fn get_account_executives(ctx: &FetchContext) -> Result<Vec<AccountExecutive>, GatewayError> {
    log::trace!("Fetching account executives");
    let list: AccountExecutiveList = api_client::get("/executives/account-executives", ctx).await?;
    log::info!("Fetched {} account executives", list.account_executives.len());
    Ok(list.account_executives)
}

pub async fn get_top_executives(ctx: &FetchContext) -> Result<Vec<ExecutivePerformance>, GatewayError> {
    log::trace!("Fetching top executives chart");
    api_client::get("/executives/top-executives-chart", ctx).await
}

pub async fn create_executive(user: &UserContext, request: &CreateExecutiveRequest) -> Result<(), GatewayError> {
    log::info!("Creating account executive: {} {}", request.first_name, request.last_name);
    let _: Value = api_client::post("/executives/account-executives", Some(&user.token), request).await?;
    Ok(())
}

pub async fn delete_executive(user: &UserContext, user_id: i32) -> Result<(), GatewayError> {
    log::info!("Deleting account executive with ID: {}", user_id);
    let endpoint = format!("/executives/account-executives/{}", user_id);
    let _: Value = api_client::delete(&endpoint, &user.token).await?;
    Ok(())
}
