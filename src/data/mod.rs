pub mod loader;
pub mod schema;

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::core::{events::LogEvent, resources::GameConfig, states::AppState};
use schema::Catalog;

// --------------------------- 资源 ---------------------------
#[derive(Resource, Default)]
pub struct CatalogAssets {
    handle: Option<Handle<Catalog>>,
}

// --------------------------- 插件 ---------------------------
pub struct DataPlugin;
impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app
            // 注册资产类型 & Loader
            .init_asset::<Catalog>()
            .register_asset_loader(loader::RonCatalogLoader)
            .init_resource::<CatalogAssets>()
            // Loading 流程
            .add_systems(OnEnter(AppState::Loading), start_loading)
            .add_systems(Update, check_loaded.run_if(in_state(AppState::Loading)));
    }
}

// --------------------------- 系统 ---------------------------
fn start_loading(
    mut catalog_assets: ResMut<CatalogAssets>,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
) {
    let handle: Handle<Catalog> = asset_server.load(config.catalog_path.clone());
    catalog_assets.handle = Some(handle);
}

fn check_loaded(
    mut commands: Commands,
    mut next: ResMut<NextState<AppState>>,
    mut app_exit: EventWriter<AppExit>,
    mut log: EventWriter<LogEvent>,
    catalog_assets: Res<CatalogAssets>,
    catalogs: Res<Assets<Catalog>>,
    asset_server: Res<AssetServer>,
) {
    let Some(handle) = &catalog_assets.handle else {
        return;
    };

    if let LoadState::Failed(err) = asset_server.load_state(handle) {
        error!("目录加载失败: {err}");
        app_exit.write(AppExit::error());
        return;
    }

    let Some(catalog) = catalogs.get(handle) else {
        return;
    };

    // 尺寸参数有误时直接退出，不进入游戏
    match catalog.validate() {
        Ok((table, fields)) => {
            info!("✔ Catalog loaded: {} bag sizes, {} fields", catalog.bags.len(), fields.fields.len());
            commands.insert_resource(table);
            commands.insert_resource(fields);
            log.write(LogEvent("输入 start [名字] 开始游戏".into()));
            next.set(AppState::Menu);
        }
        Err(err) => {
            error!("目录数据无效: {err}");
            app_exit.write(AppExit::error());
        }
    }
}
