//! Manifest bodies shared by the registry entries.
//!
//! Placeholders: `{{project_name}}`, `{{package_name}}`, `{{static_root}}`,
//! `{{view_root}}`. Each template carries exactly one marker region.

pub const GULPFILE: &str = r#"const { src, dest, parallel, series, watch } = require("gulp");
const autoprefixer = require("gulp-autoprefixer");
const cleanCSS = require("gulp-clean-css");
const concat = require("gulp-concat");
const rename = require("gulp-rename");
const sass = require("gulp-sass")(require("sass"));
const uglify = require("gulp-uglify");

// transpilex:begin paths
const paths = {
    baseSrcAssets: "./{{static_root}}/",
    baseDistAssets: "./{{static_root}}/",
};
// transpilex:end paths

const styles = function () {
    return src(paths.baseSrcAssets + "scss/**/*.scss")
        .pipe(sass().on("error", sass.logError))
        .pipe(autoprefixer())
        .pipe(dest(paths.baseDistAssets + "css/"))
        .pipe(cleanCSS())
        .pipe(rename({ suffix: ".min" }))
        .pipe(dest(paths.baseDistAssets + "css/"));
};

const scripts = function () {
    return src([paths.baseSrcAssets + "js/**/*.js", "!" + paths.baseSrcAssets + "js/**/*.min.js"])
        .pipe(concat("app.js"))
        .pipe(uglify())
        .pipe(rename({ suffix: ".min" }))
        .pipe(dest(paths.baseDistAssets + "js/"));
};

const watchFiles = function () {
    watch(paths.baseSrcAssets + "scss/**/*.scss", series(styles));
    watch(paths.baseSrcAssets + "js/**/*.js", series(scripts));
};

exports.default = series(parallel(styles, scripts), parallel(watchFiles));
exports.build = series(parallel(styles, scripts));
"#;

pub const VITE_CONFIG: &str = r"import { defineConfig } from 'vite';
import laravel from 'laravel-vite-plugin';

export default defineConfig({
    plugins: [
        laravel({
            // transpilex:begin inputs
            input: [
                'resources/css/app.css',
                'resources/js/app.js',
            ],
            // transpilex:end inputs
            refresh: true,
        }),
    ],
});
";

pub const EXPRESS_APP: &str = r"const express = require('express');
const path = require('path');
const expressLayouts = require('express-ejs-layouts');

const app = express();

// transpilex:begin app
app.set('views', path.join(__dirname, '{{view_root}}'));
app.set('view engine', 'ejs');
app.use(express.static(path.join(__dirname, '{{static_root}}')));
app.use(expressLayouts);
app.set('layout', false);

const renderView = (name) => (req, res, next) => {
    const view = name(req.params);
    res.render(view, (err, html) => {
        if (!err) {
            return res.send(html);
        }
        res.render(`${view}/index`, (indexErr, indexHtml) =>
            indexErr ? next() : res.send(indexHtml),
        );
    });
};

app.get('/', renderView(() => 'index'));
app.get('/:first', renderView((p) => p.first));
app.get('/:first/:second', renderView((p) => `${p.first}/${p.second}`));
app.get('/:first/:second/:third', renderView((p) => `${p.first}/${p.second}/${p.third}`));
// transpilex:end app

const port = process.env.PORT || 3000;
app.listen(port, () => console.log(`{{project_name}} listening on http://localhost:${port}`));
";

pub const LARAVEL_ROUTES: &str = r"<?php

use Illuminate\Support\Facades\Route;
use App\Http\Controllers\RoutingController;

// transpilex:begin routes
Route::group(['prefix' => '/'], function () {
    Route::get('', [RoutingController::class, 'index'])->name('root');
    Route::get('{first}/{second}/{third}', [RoutingController::class, 'thirdLevel'])->name('third');
    Route::get('{first}/{second}', [RoutingController::class, 'secondLevel'])->name('second');
    Route::get('{any}', [RoutingController::class, 'root'])->name('any');
});
// transpilex:end routes
";

pub const LARAVEL_ROUTING_CONTROLLER: &str = r"<?php

namespace App\Http\Controllers;

use Illuminate\Http\Request;

class RoutingController extends Controller
{
    // transpilex:begin actions
    public function index(Request $request)
    {
        return view('index');
    }

    public function root(Request $request, $first)
    {
        return $this->render($first);
    }

    public function secondLevel(Request $request, $first, $second)
    {
        return $this->render($first . '.' . $second);
    }

    public function thirdLevel(Request $request, $first, $second, $third)
    {
        return $this->render($first . '.' . $second . '.' . $third);
    }

    private function render(string $view)
    {
        if (view()->exists($view)) {
            return view($view);
        }
        abort_unless(view()->exists($view . '.index'), 404);
        return view($view . '.index');
    }
    // transpilex:end actions
}
";

pub const DJANGO_REQUIREMENTS: &str = r"# transpilex:begin requirements
Django>=5.0
# transpilex:end requirements
";

pub const FLASK_REQUIREMENTS: &str = r"# transpilex:begin requirements
Flask>=3.0
python-dotenv>=1.0
# transpilex:end requirements
";

pub const GULP_DEV_DEPENDENCIES: &[(&str, &str)] = &[
    ("gulp", "^5.0.0"),
    ("gulp-autoprefixer", "^9.0.0"),
    ("gulp-clean-css", "^4.3.0"),
    ("gulp-concat", "^2.6.1"),
    ("gulp-rename", "^2.0.0"),
    ("gulp-sass", "^5.1.0"),
    ("gulp-uglify", "^3.0.2"),
    ("sass", "^1.77.0"),
];

pub const GULP_SCRIPTS: &[(&str, &str)] = &[("dev", "gulp"), ("build", "gulp build")];
