use std::sync::Arc;

use chrono::NaiveDate;
use domain::{DomainError, NewUser, Role, User};

use crate::{
    dto::ProfileDto, error::ApplicationError, password::PasswordHasher,
    repository::UserRepository,
};

#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub father_name: String,
    pub sex: String,
    pub date_of_birth: NaiveDate,
}

pub struct UserServiceDependencies {
    pub user_repository: Arc<dyn UserRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
}

/// 注册、登录与个人资料。
pub struct UserService {
    deps: UserServiceDependencies,
}

impl UserService {
    pub fn new(deps: UserServiceDependencies) -> Self {
        Self { deps }
    }

    /// 注册新用户。邮箱、用户名任一重复即冲突；角色固定为 Patient，
    /// 医生账号由运维在库内调整。
    pub async fn register(
        &self,
        request: RegisterUserRequest,
    ) -> Result<User, ApplicationError> {
        let username = request.username.trim().to_owned();

        if self.deps.user_repository.email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyRegistered.into());
        }
        if self.deps.user_repository.username_exists(&username).await? {
            return Err(DomainError::UsernameAlreadyTaken.into());
        }

        let password_hash = self.deps.password_hasher.hash(&request.password).await?;

        let user = NewUser {
            username,
            email: request.email,
            password_hash,
            first_name: request.first_name.trim().to_owned(),
            last_name: request.last_name.trim().to_owned(),
            father_name: request.father_name.trim().to_owned(),
            sex: request.sex,
            date_of_birth: request.date_of_birth,
            role: Role::Patient,
        };

        let stored = self.deps.user_repository.create(user).await?;
        Ok(stored)
    }

    /// 按用户名 + 密码认证。查无此人与密码不匹配返回同一个错误。
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, ApplicationError> {
        let user = self
            .deps
            .user_repository
            .find_by_username(username)
            .await?
            .ok_or(ApplicationError::Authentication)?;

        let password_ok = self
            .deps
            .password_hasher
            .verify(password, &user.password_hash)
            .await?;
        if !password_ok {
            return Err(ApplicationError::Authentication);
        }

        Ok(user)
    }

    pub async fn profile(
        &self,
        user_id: domain::UserId,
    ) -> Result<ProfileDto, ApplicationError> {
        let user = self
            .deps
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;
        Ok(ProfileDto::from(&user))
    }
}
