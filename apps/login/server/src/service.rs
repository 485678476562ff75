//! Login gRPC service implementation
//!
//! Handlers unpack the request, call the domain service, and convert the
//! outcome. Domain negatives come back as `success = false`; every
//! [`UserError`](domain_users::UserError) becomes the opaque `INTERNAL` status.

use std::sync::Arc;

use domain_users::{DirectoryService, UserRepository};
use rpc::login::{
    ChangeLoginRequest, ChangePasswordRequest, LoginRequest, RangeRequest,
    Response as ProtoResponse, UserId, UserIds, Users, login_service_server::LoginService,
};
use tonic::{Request, Response, Status};

use crate::conversions::{auth_outcome_to_proto, page_to_proto, success_to_proto, users_to_proto};

/// gRPC service implementation for the login directory
///
/// Wraps the domain DirectoryService. Generic over the repository type for
/// testability.
pub struct LoginServiceImpl<R>
where
    R: UserRepository + 'static,
{
    service: Arc<DirectoryService<R>>,
}

impl<R> LoginServiceImpl<R>
where
    R: UserRepository + 'static,
{
    pub fn new(service: DirectoryService<R>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

#[tonic::async_trait]
impl<R> LoginService for LoginServiceImpl<R>
where
    R: UserRepository + 'static,
{
    async fn verify(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<ProtoResponse>, Status> {
        let req = request.into_inner();
        let outcome = self.service.verify(&req.login, &req.salted).await?;
        Ok(Response::new(auth_outcome_to_proto(outcome)))
    }

    async fn register(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<ProtoResponse>, Status> {
        let req = request.into_inner();
        let outcome = self.service.register(&req.login, &req.salted).await?;
        Ok(Response::new(auth_outcome_to_proto(outcome)))
    }

    async fn change_login(
        &self,
        request: Request<ChangeLoginRequest>,
    ) -> Result<Response<ProtoResponse>, Status> {
        let req = request.into_inner();
        let changed = self
            .service
            .change_login(req.user_id, &req.old_salted, &req.new_login, &req.new_salted)
            .await?;
        Ok(Response::new(success_to_proto(changed)))
    }

    async fn change_password(
        &self,
        request: Request<ChangePasswordRequest>,
    ) -> Result<Response<ProtoResponse>, Status> {
        let req = request.into_inner();
        let changed = self
            .service
            .change_password(req.user_id, &req.old_salted, &req.new_salted)
            .await?;
        Ok(Response::new(success_to_proto(changed)))
    }

    async fn get_users(&self, request: Request<UserIds>) -> Result<Response<Users>, Status> {
        let req = request.into_inner();
        let users = self.service.get_users(&req.ids).await?;
        Ok(Response::new(users_to_proto(users)))
    }

    async fn list_users(&self, request: Request<RangeRequest>) -> Result<Response<Users>, Status> {
        let req = request.into_inner();
        let page = self
            .service
            .list_users(req.start, req.end, &req.filter)
            .await?;
        Ok(Response::new(page_to_proto(page)))
    }

    async fn delete(&self, request: Request<UserId>) -> Result<Response<ProtoResponse>, Status> {
        let deleted = self.service.delete_user(request.into_inner().id).await?;
        Ok(Response::new(success_to_proto(deleted)))
    }
}
