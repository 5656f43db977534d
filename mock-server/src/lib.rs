//! In-memory stand-in for the Todoey backend.
//!
//! Implements the seven JSON endpoints the client uses. Every success is a
//! 200; failures use conventional 4xx codes, which the client does not
//! distinguish.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub is_done: bool,
    pub user_id: String,
}

#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserId {
    pub id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasks {
    pub user_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTask {
    pub user_id: String,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedTask {
    pub id: String,
    pub task: String,
    pub user_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRef {
    pub task_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTask {
    pub task_id: String,
    pub text: String,
}

struct Account {
    id: String,
    password: String,
}

#[derive(Default)]
pub struct Backend {
    accounts: HashMap<String, Account>,
    tasks: Vec<Task>,
}

pub type Db = Arc<RwLock<Backend>>;

type Reply<T> = Result<Json<T>, (StatusCode, &'static str)>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Backend::default()));
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/tasksById", post(list_tasks))
        .route("/addTaskById", post(add_task))
        .route("/deleteTaskById", delete(delete_task))
        .route("/toggleTaskStatusById", put(toggle_task))
        .route("/editTaskById", put(edit_task))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn register(State(db): State<Db>, Json(input): Json<Credentials>) -> Reply<UserId> {
    let mut db = db.write().await;
    if db.accounts.contains_key(&input.email) {
        tracing::info!(email = %input.email, "duplicate registration");
        return Err((StatusCode::BAD_REQUEST, "Email already exists"));
    }
    let id = Uuid::new_v4().to_string();
    db.accounts.insert(
        input.email,
        Account {
            id: id.clone(),
            password: input.password,
        },
    );
    Ok(Json(UserId { id }))
}

async fn login(State(db): State<Db>, Json(input): Json<Credentials>) -> Reply<UserId> {
    let db = db.read().await;
    match db.accounts.get(&input.email) {
        Some(account) if account.password == input.password => Ok(Json(UserId {
            id: account.id.clone(),
        })),
        _ => Err((StatusCode::UNAUTHORIZED, "Invalid credentials")),
    }
}

async fn list_tasks(State(db): State<Db>, Json(input): Json<ListTasks>) -> Json<Vec<Task>> {
    let db = db.read().await;
    Json(
        db.tasks
            .iter()
            .filter(|task| task.user_id == input.user_id)
            .cloned()
            .collect(),
    )
}

async fn add_task(State(db): State<Db>, Json(input): Json<AddTask>) -> Json<AddedTask> {
    let task = Task {
        id: Uuid::new_v4().to_string(),
        text: input.text,
        is_done: false,
        user_id: input.user_id,
    };
    let added = AddedTask {
        id: task.id.clone(),
        task: task.text.clone(),
        user_id: task.user_id.clone(),
    };
    db.write().await.tasks.push(task);
    Json(added)
}

async fn delete_task(State(db): State<Db>, Json(input): Json<TaskRef>) -> Reply<Task> {
    let mut db = db.write().await;
    let index = db
        .tasks
        .iter()
        .position(|task| task.id == input.task_id)
        .ok_or((StatusCode::NOT_FOUND, "Task not found"))?;
    Ok(Json(db.tasks.remove(index)))
}

async fn toggle_task(State(db): State<Db>, Json(input): Json<TaskRef>) -> Reply<Task> {
    let mut db = db.write().await;
    let task = find_task(&mut db, &input.task_id)?;
    task.is_done = !task.is_done;
    Ok(Json(task.clone()))
}

async fn edit_task(State(db): State<Db>, Json(input): Json<EditTask>) -> Reply<Task> {
    let mut db = db.write().await;
    let task = find_task(&mut db, &input.task_id)?;
    task.text = input.text;
    Ok(Json(task.clone()))
}

fn find_task<'a>(
    db: &'a mut Backend,
    task_id: &str,
) -> Result<&'a mut Task, (StatusCode, &'static str)> {
    db.tasks
        .iter_mut()
        .find(|task| task.id == task_id)
        .ok_or((StatusCode::NOT_FOUND, "Task not found"))
}
